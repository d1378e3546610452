//! Projection of store state onto a display surface.
//!
//! Every redraw rebuilds the full row list from the current tasks; nothing
//! is diffed and the renderer keeps no state between calls.

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::date;
use crate::task::{Task, TaskId};

pub const TOGGLE_LABEL: &str = "Complete";
pub const UNDO_LABEL: &str = "Undo";
pub const DELETE_LABEL: &str = "Delete";

/// What a row control does when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "task_id", rename_all = "snake_case")]
pub enum ControlAction {
    Toggle(TaskId),
    Delete(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub label: &'static str,
    #[serde(flatten)]
    pub action: ControlAction,
}

/// One displayed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub task_id: TaskId,
    pub text: String,
    pub classes: Vec<String>,
    pub controls: Vec<Control>,
}

impl Row {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|value| value == class)
    }

    pub fn control(&self, label: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.label == label)
    }

    /// Single-line plain text form: `text [Control] [Control]`.
    pub fn to_line(&self) -> String {
        let mut line = self.text.clone();
        for control in &self.controls {
            line.push_str(" [");
            line.push_str(control.label);
            line.push(']');
        }
        line
    }
}

/// Options that shape the rendered rows.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub completed_class: String,
    pub invalid_date: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for RenderOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            completed_class: config.completed_class.clone(),
            invalid_date: config.invalid_date.clone(),
        }
    }
}

/// Receives the rebuilt row list after every mutation.
pub trait DisplaySurface {
    /// Replace everything shown with `rows`.
    fn redraw(&mut self, rows: &[Row]);

    /// Show a warning the user has to acknowledge.
    fn warn(&mut self, message: &str);
}

pub fn render(tasks: &[Task], options: &RenderOptions) -> Vec<Row> {
    tasks.iter().map(|task| render_row(task, options)).collect()
}

pub fn render_row(task: &Task, options: &RenderOptions) -> Row {
    let due = date::format_due_date(&task.due_date, &options.date_format)
        .unwrap_or_else(|| options.invalid_date.clone());
    let classes = if task.completed {
        vec![options.completed_class.clone()]
    } else {
        Vec::new()
    };
    let toggle_label = if task.completed {
        UNDO_LABEL
    } else {
        TOGGLE_LABEL
    };
    Row {
        task_id: task.id.clone(),
        text: format!("{} (Due: {})", task.title, due),
        classes,
        controls: vec![
            Control {
                label: toggle_label,
                action: ControlAction::Toggle(task.id.clone()),
            },
            Control {
                label: DELETE_LABEL,
                action: ControlAction::Delete(task.id.clone()),
            },
        ],
    }
}

/// Surface that keeps the last redraw in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    rows: Vec<Row>,
    warnings: Vec<String>,
    redraws: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(Row::to_line).collect()
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

impl DisplaySurface for MemorySurface {
    fn redraw(&mut self, rows: &[Row]) {
        self.rows = rows.to_vec();
        self.redraws += 1;
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id),
            title: "Buy milk".to_string(),
            due_date: "2025-01-05".to_string(),
            completed,
        }
    }

    #[test]
    fn open_task_row_offers_complete() {
        let row = render_row(&task("1", false), &RenderOptions::default());
        assert_eq!(row.text, "Buy milk (Due: Jan 05, 2025)");
        assert!(row.classes.is_empty());
        assert_eq!(
            row.control(TOGGLE_LABEL).map(|c| &c.action),
            Some(&ControlAction::Toggle(TaskId::new("1")))
        );
        assert_eq!(row.to_line(), "Buy milk (Due: Jan 05, 2025) [Complete] [Delete]");
    }

    #[test]
    fn completed_task_row_offers_undo() {
        let row = render_row(&task("1", true), &RenderOptions::default());
        assert!(row.has_class("completed"));
        assert!(row.control(UNDO_LABEL).is_some());
        assert!(row.control(TOGGLE_LABEL).is_none());
    }

    #[test]
    fn unparseable_due_date_renders_placeholder() {
        let mut open = task("1", false);
        open.due_date = "someday".to_string();
        let row = render_row(&open, &RenderOptions::default());
        assert_eq!(row.text, "Buy milk (Due: Invalid date)");
    }

    #[test]
    fn control_serializes_with_action_and_id() {
        let control = Control {
            label: DELETE_LABEL,
            action: ControlAction::Delete(TaskId::new("7")),
        };
        let value = serde_json::to_value(&control).expect("json");
        assert_eq!(value["label"], "Delete");
        assert_eq!(value["action"], "delete");
        assert_eq!(value["task_id"], "7");
    }
}
