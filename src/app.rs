//! Event wiring between the input surface, the store and the renderer.
//!
//! `App` owns the store and the display surface for one session. Each
//! handler mutates the store at most once and then redraws, so the surface
//! always matches the store when a handler returns.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::render::{self, ControlAction, DisplaySurface, RenderOptions};
use crate::store::TaskStore;
use crate::task::TaskId;

/// Values currently typed into the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
}

/// A submission that passed the presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
        }
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<NewTask> {
        if self.title.is_empty() || self.due_date.is_empty() {
            return Err(Error::IncompleteSubmission);
        }
        Ok(NewTask {
            title: self.title.clone(),
            due_date: self.due_date.clone(),
        })
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.due_date.clear();
    }
}

/// The event that triggered a form submission.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the default action (leaving the page, closing the form).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of one handler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Added(TaskId),
    Toggled(TaskId),
    Deleted(TaskId),
    /// The id matched no task; nothing changed.
    Unchanged,
    /// The submission was refused with a warning.
    Rejected(String),
}

pub struct App<S: DisplaySurface> {
    store: TaskStore,
    surface: S,
    options: RenderOptions,
}

impl<S: DisplaySurface> App<S> {
    /// Take ownership of the store and surface and draw the initial list.
    pub fn new(store: TaskStore, surface: S, options: RenderOptions) -> Self {
        let mut app = Self {
            store,
            surface,
            options,
        };
        app.redraw();
        app
    }

    /// Handle a form submission.
    ///
    /// Incomplete forms are rejected with a warning and left as typed;
    /// accepted forms are added and cleared.
    pub fn submit(&mut self, event: &mut SubmitEvent, form: &mut TaskForm) -> Outcome {
        event.prevent_default();
        let input = match form.validate() {
            Ok(input) => input,
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    title_empty = form.title.is_empty(),
                    due_date_empty = form.due_date.is_empty(),
                    "submission rejected"
                );
                self.surface.warn(&message);
                return Outcome::Rejected(message);
            }
        };
        let id = self.store.add(input.title, input.due_date).id.clone();
        form.reset();
        self.redraw();
        Outcome::Added(id)
    }

    pub fn toggle(&mut self, id: &TaskId) -> Outcome {
        let matched = self.store.toggle_completion(id);
        self.redraw();
        if matched {
            Outcome::Toggled(id.clone())
        } else {
            Outcome::Unchanged
        }
    }

    pub fn delete(&mut self, id: &TaskId) -> Outcome {
        let matched = self.store.delete(id);
        self.redraw();
        if matched {
            Outcome::Deleted(id.clone())
        } else {
            Outcome::Unchanged
        }
    }

    /// Run the handler bound to a row control.
    pub fn activate(&mut self, action: &ControlAction) -> Outcome {
        match action {
            ControlAction::Toggle(id) => self.toggle(id),
            ControlAction::Delete(id) => self.delete(id),
        }
    }

    /// Rebuild the surface from the current store contents.
    pub fn redraw(&mut self) {
        let rows = render::render(self.store.tasks(), &self.options);
        self.surface.redraw(&rows);
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}
