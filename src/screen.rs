//! Plain-text screen: renders controller state and parses typed lines.
//!
//! A plain line is task text to submit. Lines starting with `/` are
//! commands: `/done <id>` taps a pending item, `/rm <id>` taps a completed
//! one.

use crate::controller::{ListController, Notice, NoticeKind};
use crate::error::{Error, Result};
use crate::model::{ItemId, Partition, WorkItem};
use std::fmt::Write as _;

pub const TITLE: &str = "Armazenamento Interno - SQLite";

pub const PROMPT: &str = "O que você precisa fazer? ";

pub const HELP: &str = "\
  <texto>     adiciona um item pendente
  /done <id>  marca um item pendente como completo
  /rm <id>    apaga um item completo
  /dismiss    esconde o aviso atual
  /help       mostra esta ajuda
  /quit       sai";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Type the text into the input field and press submit.
    Submit(String),
    Complete(ItemId),
    Remove(ItemId),
    Dismiss,
    Help,
    Quit,
}

impl ScreenCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.trim_start().strip_prefix('/') else {
            return Ok(ScreenCommand::Submit(line.to_string()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "done" => Ok(ScreenCommand::Complete(parse_id(name, arg)?)),
            "rm" => Ok(ScreenCommand::Remove(parse_id(name, arg)?)),
            "dismiss" => Ok(ScreenCommand::Dismiss),
            "help" | "?" => Ok(ScreenCommand::Help),
            "quit" | "q" => Ok(ScreenCommand::Quit),
            other => Err(Error::Other(format!("unknown command /{other}, try /help"))),
        }
    }
}

fn parse_id(command: &str, arg: Option<&str>) -> Result<ItemId> {
    let raw = arg.ok_or_else(|| Error::Other(format!("usage: /{command} <id>")))?;
    raw.parse()
        .map_err(|_| Error::Other(format!("invalid item id: {raw}")))
}

/// Render the whole screen: title, notice banner, both lists.
pub fn render(controller: &ListController) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.chars().count()));

    if let Some(notice) = controller.notice() {
        let _ = writeln!(out, "{}", render_notice(notice));
    }

    out.push('\n');
    for partition in [Partition::Pending, Partition::Completed] {
        out.push_str(&render_partition(partition, controller.items(partition)));
        out.push('\n');
    }
    out
}

/// Render one list section under its heading.
pub fn render_partition(partition: Partition, items: &[WorkItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", partition.heading());

    if items.is_empty() {
        let _ = writeln!(out, "  (vazio)");
        return out;
    }

    let width = items
        .iter()
        .map(|item| item.id.to_string().len())
        .max()
        .unwrap_or(1);
    for item in items {
        let _ = writeln!(out, "  #{:<width$}  {}", item.id.0, item.value);
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("[ok] {}", notice.text),
        NoticeKind::Failure => format!("[erro] {}", notice.text),
    }
}
