use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::TaskForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFieldId {
    Title,
    DueDate,
}

impl FormFieldId {
    pub fn label(self) -> &'static str {
        match self {
            FormFieldId::Title => "Title",
            FormFieldId::DueDate => "Due",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormFieldId::Title => "what needs doing",
            FormFieldId::DueDate => "YYYY-MM-DD",
        }
    }
}

pub const FIELDS: [FormFieldId; 2] = [FormFieldId::Title, FormFieldId::DueDate];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    /// Move focus out of the form.
    Leave,
}

/// Key handling for the two-field task form.
#[derive(Debug, Clone, Default)]
pub struct FormEditor {
    form: TaskForm,
    active: usize,
}

impl FormEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn active_field(&self) -> FormFieldId {
        FIELDS[self.active]
    }

    pub fn value(&self, id: FormFieldId) -> &str {
        match id {
            FormFieldId::Title => &self.form.title,
            FormFieldId::DueDate => &self.form.due_date,
        }
    }

    /// Put the caret back on the title field, e.g. after a submit.
    pub fn focus_first(&mut self) {
        self.active = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('u') {
                self.current_value_mut().clear();
            }
            return FormAction::None;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Leave,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => {
                if self.active + 1 >= FIELDS.len() {
                    self.active = 0;
                    return FormAction::Leave;
                }
                self.active += 1;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.saturating_sub(1);
            }
            KeyCode::Backspace => {
                self.current_value_mut().pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.current_value_mut().push(ch);
            }
            _ => {}
        }
        FormAction::None
    }

    fn current_value_mut(&mut self) -> &mut String {
        match FIELDS[self.active] {
            FormFieldId::Title => &mut self.form.title,
            FormFieldId::DueDate => &mut self.form.due_date,
        }
    }
}
