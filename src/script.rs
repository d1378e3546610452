//! Line-oriented session scripts.
//!
//! The due date follows the last `|` of an `add` line. Both fields are
//! trimmed, so a whitespace-only title reads as empty.
//!
//! ```text
//! # comment
//! add Buy milk | 2025-01-05
//! toggle 1
//! render
//! delete 1
//! ```

use serde::Serialize;

use crate::app::{App, Outcome, SubmitEvent, TaskForm};
use crate::error::{Error, Result};
use crate::render::{MemorySurface, Row};
use crate::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add { title: String, due_date: String },
    Toggle(TaskId),
    Delete(TaskId),
    Render,
}

/// Collected results of a script run.
#[derive(Debug, Default, Serialize)]
pub struct ScriptReport {
    pub outcomes: Vec<Outcome>,
    /// Snapshots printed by `render` commands.
    pub snapshots: Vec<Vec<Row>>,
    pub rows: Vec<Row>,
    pub warnings: Vec<String>,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push(parse_line(line).map_err(|message| Error::ScriptSyntax {
            line: idx + 1,
            message,
        })?);
    }
    Ok(commands)
}

fn parse_line(line: &str) -> std::result::Result<ScriptCommand, String> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb {
        "add" => {
            let (title, due_date) = rest.rsplit_once('|').unwrap_or((rest, ""));
            Ok(ScriptCommand::Add {
                title: title.trim().to_string(),
                due_date: due_date.trim().to_string(),
            })
        }
        "toggle" => task_id_arg(verb, rest).map(ScriptCommand::Toggle),
        "delete" => task_id_arg(verb, rest).map(ScriptCommand::Delete),
        "render" if rest.is_empty() => Ok(ScriptCommand::Render),
        "render" => Err("render takes no arguments".to_string()),
        other => Err(format!("unknown command `{other}`")),
    }
}

fn task_id_arg(verb: &str, rest: &str) -> std::result::Result<TaskId, String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(format!("{verb} expects exactly one task id"));
    }
    Ok(TaskId::from(rest))
}

/// Run parsed commands against an app, one handler call per command.
pub fn run_script(app: &mut App<MemorySurface>, commands: &[ScriptCommand]) -> ScriptReport {
    let mut report = ScriptReport::default();
    for command in commands {
        let outcome = match command {
            ScriptCommand::Add { title, due_date } => {
                let mut form = TaskForm::new(title.clone(), due_date.clone());
                app.submit(&mut SubmitEvent::new(), &mut form)
            }
            ScriptCommand::Toggle(id) => app.toggle(id),
            ScriptCommand::Delete(id) => app.delete(id),
            ScriptCommand::Render => {
                report.snapshots.push(app.surface().rows().to_vec());
                continue;
            }
        };
        report.outcomes.push(outcome);
    }
    report.rows = app.surface().rows().to_vec();
    report.warnings = app.surface_mut().take_warnings();
    report
}
