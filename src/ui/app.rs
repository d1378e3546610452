use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{App, Outcome, SubmitEvent};
use crate::config::Config;
use crate::error::Result;
use crate::render::{ControlAction, RenderOptions, Row};
use crate::store::TaskStore;

use super::form::{FormAction, FormEditor};
use super::surface::TerminalSurface;
use super::view;

const EVENT_POLL_MS: u64 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Form,
    List,
}

pub struct UiState {
    pub(crate) app: App<TerminalSurface>,
    pub(crate) form: FormEditor,
    pub(crate) focus: Focus,
    pub(crate) selected: Option<usize>,
    pub(crate) show_help: bool,
    pub(crate) info_message: Option<String>,
}

impl UiState {
    pub fn new(store: TaskStore, options: RenderOptions) -> Self {
        let app = App::new(store, TerminalSurface::new(), options);
        let mut state = Self {
            app,
            form: FormEditor::new(),
            focus: Focus::Form,
            selected: None,
            show_help: false,
            info_message: None,
        };
        state.clamp_selection();
        state
    }

    pub(crate) fn rows(&self) -> &[Row] {
        self.app.surface().rows()
    }

    pub(crate) fn warning(&self) -> Option<&str> {
        self.app.surface().warning()
    }

    pub(crate) fn selected_row(&self) -> Option<&Row> {
        self.selected.and_then(|idx| self.rows().get(idx))
    }

    pub(crate) fn footer_hint(&self) -> &'static str {
        if self.warning().is_some() {
            return "enter/esc dismiss";
        }
        match self.focus {
            Focus::Form => "type to edit  tab next field  enter add  esc list  ctrl+c quit",
            Focus::List => "j/k move  c complete/undo  d delete  n new task  ? help  q quit",
        }
    }

    pub(crate) fn task_count_summary(&self) -> String {
        let total = self.rows().len();
        let done = self
            .rows()
            .iter()
            .filter(|row| row.has_class(&self.app.options().completed_class))
            .count();
        format!("open: {}  completed: {}", total - done, done)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected = Some(next as usize);
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(idx)) => Some(idx.min(len - 1)),
        };
    }

    fn submit(&mut self) {
        let mut event = SubmitEvent::new();
        let outcome = self.app.submit(&mut event, self.form.form_mut());
        if let Outcome::Added(id) = &outcome {
            self.info_message = Some(format!("added #{id}"));
            self.selected = Some(self.rows().len().saturating_sub(1));
            self.form.focus_first();
        }
        self.clamp_selection();
    }

    fn activate_selected(&mut self, delete: bool) {
        let Some(row) = self.selected_row() else {
            self.info_message = Some("no task selected".to_string());
            return;
        };
        let action = row
            .controls
            .iter()
            .map(|control| &control.action)
            .find(|action| matches!(action, ControlAction::Delete(_)) == delete)
            .cloned();
        let Some(action) = action else {
            return;
        };
        self.info_message = Some(match self.app.activate(&action) {
            Outcome::Toggled(id) => format!("toggled #{id}"),
            Outcome::Deleted(id) => format!("deleted #{id}"),
            _ => "nothing changed".to_string(),
        });
        self.clamp_selection();
    }
}

pub fn run(config: &Config) -> Result<()> {
    let store = TaskStore::new(config.tasks.id_strategy);
    let mut state = UiState::new(store, RenderOptions::from(&config.display));
    run_terminal(&mut state)
}

/// Runs a cleanup closure when dropped, including during unwinding.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

fn run_terminal(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    let _guard = RestoreGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_loop(&mut terminal, state)
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut UiState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, state))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(state, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Apply one key press. Returns true when the session should end.
pub(crate) fn handle_key(state: &mut UiState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if state.warning().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.app.surface_mut().dismiss_warning();
        }
        return false;
    }

    match state.focus {
        Focus::Form => {
            match state.form.handle_key(key) {
                FormAction::Submit => state.submit(),
                FormAction::Leave => state.focus = Focus::List,
                FormAction::None => {}
            }
            false
        }
        Focus::List => handle_list_key(state, key),
    }
}

fn handle_list_key(state: &mut UiState, key: KeyEvent) -> bool {
    state.info_message = None;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => state.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection(-1),
        KeyCode::Home | KeyCode::Char('g') => {
            state.selected = (!state.rows().is_empty()).then_some(0);
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.selected = state.rows().len().checked_sub(1);
        }
        KeyCode::Char('c') | KeyCode::Char(' ') | KeyCode::Enter => state.activate_selected(false),
        KeyCode::Char('d') | KeyCode::Delete => state.activate_selected(true),
        KeyCode::Char('n') | KeyCode::Char('i') | KeyCode::Tab | KeyCode::BackTab => {
            state.focus = Focus::Form;
        }
        KeyCode::Char('?') => state.show_help = !state.show_help,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut UiState, text: &str) {
        for ch in text.chars() {
            handle_key(state, key(KeyCode::Char(ch)));
        }
    }

    fn add_task(state: &mut UiState, title: &str, due: &str) {
        state.focus = Focus::Form;
        type_text(state, title);
        handle_key(state, key(KeyCode::Tab));
        type_text(state, due);
        handle_key(state, key(KeyCode::Enter));
    }

    fn state() -> UiState {
        UiState::new(TaskStore::default(), RenderOptions::default())
    }

    #[test]
    fn enter_in_form_adds_and_clears() {
        let mut state = state();
        add_task(&mut state, "Buy milk", "2025-01-05");
        assert_eq!(state.app.store().len(), 1);
        assert_eq!(state.rows()[0].text, "Buy milk (Due: Jan 05, 2025)");
        assert!(state.form.form().title.is_empty());
        assert!(state.form.form().due_date.is_empty());
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn incomplete_form_blocks_until_dismissed() {
        let mut state = state();
        type_text(&mut state, "Buy milk");
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.warning().is_some());
        assert!(state.app.store().is_empty());

        // Typing is swallowed while the warning is up.
        type_text(&mut state, "x");
        assert_eq!(state.form.form().title, "Buy milk");

        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.warning().is_none());
    }

    #[test]
    fn list_keys_toggle_and_delete_selected() {
        let mut state = state();
        add_task(&mut state, "first", "2025-01-01");
        add_task(&mut state, "second", "2025-01-02");
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.focus, Focus::List);

        handle_key(&mut state, key(KeyCode::Char('k')));
        handle_key(&mut state, key(KeyCode::Char('c')));
        assert!(state.app.store().get(&TaskId::new("1")).expect("task").completed);
        assert_eq!(state.rows()[0].controls[0].label, "Undo");

        handle_key(&mut state, key(KeyCode::Char('d')));
        assert_eq!(state.app.store().len(), 1);
        assert_eq!(state.rows()[0].task_id, TaskId::new("2"));
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn delete_last_row_clears_selection() {
        let mut state = state();
        add_task(&mut state, "only", "2025-01-01");
        handle_key(&mut state, key(KeyCode::Esc));
        handle_key(&mut state, key(KeyCode::Char('d')));
        assert!(state.rows().is_empty());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn q_quits_from_list_but_types_in_form() {
        let mut state = state();
        assert!(!handle_key(&mut state, key(KeyCode::Char('q'))));
        assert_eq!(state.form.form().title, "q");
        handle_key(&mut state, key(KeyCode::Esc));
        assert!(handle_key(&mut state, key(KeyCode::Char('q'))));
    }

    #[test]
    fn restore_guard_runs_on_early_return() {
        use std::cell::Cell;

        let restored = Cell::new(0);
        let setup = || -> Result<()> {
            let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
            Err(crate::Error::OperationFailed("draw failed".to_string()))
        };
        assert!(setup().is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn restore_guard_runs_when_the_loop_panics() {
        use std::panic::{self, AssertUnwindSafe};
        use std::sync::atomic::{AtomicUsize, Ordering};

        let restored = AtomicUsize::new(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = RestoreGuard::new(|| {
                restored.fetch_add(1, Ordering::SeqCst);
            });
            panic!("render blew up");
        }));
        assert!(result.is_err());
        assert_eq!(restored.load(Ordering::SeqCst), 1);
    }
}
