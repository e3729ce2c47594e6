//! tasklist CLI — the to-do screen in a terminal.

use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tasklist::config::Config;
use tasklist::controller::{ActionOutcome, ControllerConfig, ListController, sleep_until_deadline};
use tasklist::db::Db;
use tasklist::model::{ItemId, Partition};
use tasklist::screen::{self, ScreenCommand};
use tasklist::telemetry::{TelemetryConfig, init_telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tasklist", about = "Single-screen to-do list backed by SQLite")]
struct Cli {
    /// Database file (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive screen (default)
    Shell,
    /// Add a pending item
    Add {
        /// Task description
        text: Vec<String>,
    },
    /// Mark a pending item as done
    Done {
        /// Item ID
        id: ItemId,
    },
    /// Delete a completed item
    Rm {
        /// Item ID
        id: ItemId,
    },
    /// List items
    List {
        /// Show the completed list instead of the pending one
        #[arg(long)]
        completed: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.db {
        config.database_path = path;
    }

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "tasklist".to_string(),
        default_filter: config.log_level.clone(),
    })?;

    let db = Db::connect(&config.database_path).await?;
    info!(path = %config.database_path.display(), "database opened");
    let mut controller =
        ListController::mount(Arc::new(db), ControllerConfig::from(&config)).await?;

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => cmd_shell(&mut controller).await,
        Command::Add { text } => {
            controller.set_input(text.join(" "));
            let outcome = controller.add().await;
            report(&controller, outcome)
        }
        Command::Done { id } => {
            let outcome = controller.complete(id).await;
            report(&controller, outcome)
        }
        Command::Rm { id } => {
            let outcome = controller.remove(id).await;
            report(&controller, outcome)
        }
        Command::List { completed, json } => cmd_list(&controller, completed, json),
    };

    controller.shutdown().await;
    result
}

async fn cmd_shell(controller: &mut ListController) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(controller, None)?;

    loop {
        let deadline = controller.notice_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                let status = match ScreenCommand::parse(&line) {
                    Ok(ScreenCommand::Quit) => return Ok(()),
                    Ok(ScreenCommand::Help) => Some(screen::HELP.to_string()),
                    Ok(ScreenCommand::Dismiss) => {
                        controller.dismiss_notice();
                        None
                    }
                    Ok(ScreenCommand::Submit(text)) => {
                        controller.set_input(text);
                        controller.add().await;
                        None
                    }
                    Ok(ScreenCommand::Complete(id)) => {
                        ignored_hint(controller.complete(id).await, id, Partition::Pending)
                    }
                    Ok(ScreenCommand::Remove(id)) => {
                        ignored_hint(controller.remove(id).await, id, Partition::Completed)
                    }
                    Err(e) => Some(e.to_string()),
                };
                draw(controller, status.as_deref())?;
            }
            _ = sleep_until_deadline(deadline) => {
                if controller.expire_notice(Instant::now()) {
                    draw(controller, None)?;
                }
            }
        }
    }
}

fn ignored_hint(outcome: ActionOutcome, id: ItemId, partition: Partition) -> Option<String> {
    (outcome == ActionOutcome::Ignored).then(|| format!("#{id} não está na lista {}", partition.heading()))
}

fn draw(controller: &ListController, status: Option<&str>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    // Clear screen, cursor home.
    write!(stdout, "\x1b[2J\x1b[H")?;
    write!(stdout, "{}", screen::render(controller))?;
    if let Some(status) = status {
        writeln!(stdout, "{status}")?;
    }
    write!(stdout, "{}{}", screen::PROMPT, controller.input())?;
    stdout.flush()?;
    Ok(())
}

fn report(controller: &ListController, outcome: ActionOutcome) -> anyhow::Result<()> {
    if outcome == ActionOutcome::Ignored {
        warn!("nothing to do");
    }
    print!("{}", screen::render(controller));
    if outcome == ActionOutcome::Failed {
        anyhow::bail!("store operation failed");
    }
    Ok(())
}

fn cmd_list(controller: &ListController, completed: bool, json: bool) -> anyhow::Result<()> {
    let partition = Partition::from_done(completed);
    let items = controller.items(partition);

    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        print!("{}", screen::render_partition(partition, items));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}
