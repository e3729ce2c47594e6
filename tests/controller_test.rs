//! Integration tests for the list controller.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tasklist::controller::{
    ActionOutcome, ControllerConfig, ListController, NoticeKind, SUCCESS_TEXT,
};
use tasklist::db::Db;
use tasklist::model::ItemId;

async fn mount_with(duration: Duration) -> (ListController, Arc<Db>) {
    let db = Arc::new(Db::in_memory().await.expect("failed to open in-memory db"));
    let controller = ListController::mount(
        Arc::clone(&db),
        ControllerConfig {
            notice_duration: duration,
        },
    )
    .await
    .expect("mount failed");
    (controller, db)
}

async fn mount() -> (ListController, Arc<Db>) {
    mount_with(Duration::from_millis(3000)).await
}

async fn add(controller: &mut ListController, text: &str) -> ItemId {
    controller.set_input(text);
    assert_eq!(controller.add().await, ActionOutcome::Applied);
    controller
        .pending()
        .last()
        .map(|item| item.id)
        .expect("added item should be pending")
}

fn values(items: &[tasklist::model::WorkItem]) -> Vec<&str> {
    items.iter().map(|item| item.value.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mount_creates_schema_and_starts_empty() {
    let (controller, db) = mount().await;

    assert!(controller.pending().is_empty());
    assert!(controller.completed().is_empty());
    assert!(controller.notice().is_none());
    assert!(controller.input().is_empty());
    assert!(db.list_items(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn mount_loads_existing_items() {
    let db = Arc::new(Db::in_memory().await.unwrap());
    db.ensure_schema().await.unwrap();
    db.insert_item("already here").await.unwrap();

    let controller = ListController::mount(Arc::clone(&db), ControllerConfig::default())
        .await
        .unwrap();
    assert_eq!(values(controller.pending()), vec!["already here"]);
}

#[tokio::test]
async fn mount_fails_when_schema_cannot_be_created() {
    let db = Arc::new(Db::in_memory().await.unwrap());
    db.close().await;

    let result = ListController::mount(db, ControllerConfig::default()).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_clears_input_shows_notice_and_refreshes() {
    let (mut controller, _db) = mount().await;

    controller.set_input("  Buy milk  ");
    assert_eq!(controller.add().await, ActionOutcome::Applied);

    assert!(controller.input().is_empty());
    assert_eq!(values(controller.pending()), vec!["Buy milk"]);
    assert!(controller.completed().is_empty());

    let notice = controller.notice().expect("success notice should show");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, SUCCESS_TEXT);
}

#[tokio::test]
async fn blank_add_is_ignored_and_keeps_input() {
    let (mut controller, db) = mount().await;

    controller.set_input("   ");
    assert_eq!(controller.add().await, ActionOutcome::Ignored);

    assert_eq!(controller.input(), "   ");
    assert!(controller.notice().is_none());
    assert!(controller.pending().is_empty());
    assert!(db.list_items(false).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Taps
// ---------------------------------------------------------------------------

#[tokio::test]
async fn buy_milk_scenario() {
    let (mut controller, _db) = mount().await;

    let id = add(&mut controller, "Buy milk").await;
    assert_eq!(values(controller.pending()), vec!["Buy milk"]);
    assert!(controller.completed().is_empty());

    assert_eq!(controller.complete(id).await, ActionOutcome::Applied);
    assert!(controller.pending().is_empty());
    assert_eq!(values(controller.completed()), vec!["Buy milk"]);

    assert_eq!(controller.remove(id).await, ActionOutcome::Applied);
    assert!(controller.pending().is_empty());
    assert!(controller.completed().is_empty());
}

#[tokio::test]
async fn pending_items_cannot_be_removed() {
    let (mut controller, db) = mount().await;
    let id = add(&mut controller, "Buy milk").await;

    assert_eq!(controller.remove(id).await, ActionOutcome::Ignored);
    assert_eq!(db.list_items(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn completed_items_cannot_be_completed_again() {
    let (mut controller, _db) = mount().await;
    let id = add(&mut controller, "Buy milk").await;
    controller.complete(id).await;

    assert_eq!(controller.complete(id).await, ActionOutcome::Ignored);
    assert_eq!(values(controller.completed()), vec!["Buy milk"]);
}

#[tokio::test]
async fn unknown_ids_are_ignored() {
    let (mut controller, _db) = mount().await;
    add(&mut controller, "Buy milk").await;

    assert_eq!(controller.complete(ItemId(42)).await, ActionOutcome::Ignored);
    assert_eq!(controller.remove(ItemId(42)).await, ActionOutcome::Ignored);
    assert_eq!(controller.pending().len(), 1);
}

#[tokio::test]
async fn refresh_sees_changes_made_behind_the_controller() {
    let (mut controller, db) = mount().await;
    db.insert_item("from elsewhere").await.unwrap();
    assert!(controller.pending().is_empty());

    assert_eq!(controller.refresh().await, ActionOutcome::Applied);
    assert_eq!(values(controller.pending()), vec!["from elsewhere"]);
}

// ---------------------------------------------------------------------------
// Notice lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_notice_expires_after_duration() {
    let (mut controller, _db) = mount().await;
    add(&mut controller, "Buy milk").await;

    let deadline = controller.notice_deadline().expect("success has a deadline");
    assert!(!controller.expire_notice(deadline - Duration::from_millis(1)));
    assert!(controller.notice().is_some());

    assert!(controller.expire_notice(deadline));
    assert!(controller.notice().is_none());
    assert_eq!(controller.notice_deadline(), None);
}

#[tokio::test]
async fn second_add_resets_the_deadline() {
    let (mut controller, _db) = mount().await;

    let before_first = Instant::now();
    add(&mut controller, "one").await;
    let first = controller.notice_deadline().unwrap();
    assert!(first >= before_first + Duration::from_millis(3000));

    tokio::time::sleep(Duration::from_millis(20)).await;
    add(&mut controller, "two").await;
    let second = controller.notice_deadline().unwrap();

    assert!(second > first);
    // The first deadline no longer hides the banner.
    assert!(!controller.expire_notice(first));
    assert!(controller.notice().is_some());
}

#[tokio::test]
async fn wait_notice_expiry_hides_the_banner() {
    let (mut controller, _db) = mount_with(Duration::from_millis(30)).await;
    add(&mut controller, "Buy milk").await;
    assert!(controller.notice().is_some());

    tokio::time::timeout(Duration::from_secs(5), controller.wait_notice_expiry())
        .await
        .expect("notice should expire");
    assert!(controller.notice().is_none());
}

#[tokio::test]
async fn wait_notice_expiry_pends_without_notice() {
    let (mut controller, _db) = mount().await;

    let waited =
        tokio::time::timeout(Duration::from_millis(50), controller.wait_notice_expiry()).await;
    assert!(waited.is_err());
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_shows_failure_notice() {
    let (mut controller, db) = mount().await;
    let id = add(&mut controller, "Buy milk").await;
    db.close().await;

    controller.set_input("Walk the dog");
    assert_eq!(controller.add().await, ActionOutcome::Failed);

    let notice = controller.notice().expect("failure notice should show");
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert_eq!(notice.expires_at, None);
    // Input is kept so the user can retry.
    assert_eq!(controller.input(), "Walk the dog");
    // Last good snapshot stays on screen.
    assert_eq!(controller.pending().len(), 1);

    assert_eq!(controller.complete(id).await, ActionOutcome::Failed);
    assert!(!controller.expire_notice(Instant::now() + Duration::from_secs(60)));

    controller.dismiss_notice();
    assert!(controller.notice().is_none());
}
