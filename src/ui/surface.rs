use crate::render::{DisplaySurface, Row};

/// Display surface backing the terminal view.
///
/// Holds the last redraw for the next frame and at most one pending warning,
/// which blocks other input until dismissed.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    rows: Vec<Row>,
    warning: Option<String>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }
}

impl DisplaySurface for TerminalSurface {
    fn redraw(&mut self, rows: &[Row]) {
        self.rows = rows.to_vec();
    }

    fn warn(&mut self, message: &str) {
        self.warning = Some(message.to_string());
    }
}
