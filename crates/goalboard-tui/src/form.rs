//! Goal form dialog state.

use crossterm::event::{KeyCode, KeyEvent};
use goalboard_core::FieldError;
use goalboard_domain::{Goal, GoalCategory, GoalForm, GoalStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Status => "Status",
        }
    }

    /// Name used by validation errors for this field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::Status => "status",
        }
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub form: GoalForm,
    pub field: FormField,
    pub errors: Vec<FieldError>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            form: GoalForm::default(),
            field: FormField::Title,
            errors: Vec::new(),
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> T {
    let len = all.len();
    match current.and_then(|c| all.iter().position(|&x| x == c)) {
        Some(i) if forward => all[(i + 1) % len],
        Some(i) => all[(i + len - 1) % len],
        None => all[0],
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            form: GoalForm::from_goal(goal),
            ..Self::default()
        }
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field.key())
    }

    pub fn set_errors(&mut self, errors: &[FieldError]) {
        self.errors = errors.to_vec();
        if let Some(first) = FormField::ALL
            .iter()
            .find(|f| self.errors.iter().any(|e| e.field == f.key()))
        {
            self.field = *first;
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.form.title,
            FormField::Description => &self.form.description,
            FormField::Category => &self.form.category,
            FormField::Status => &self.form.status,
        }
    }

    /// Human label for the selectable fields, raw text for the others.
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::Category => self
                .form
                .category
                .parse::<GoalCategory>()
                .map(|c| c.label().to_string())
                .unwrap_or_else(|_| self.form.category.clone()),
            FormField::Status => self
                .form
                .status
                .parse::<GoalStatus>()
                .map(|s| format!("{} {}", s.icon(), s.title()))
                .unwrap_or_else(|_| self.form.status.clone()),
            _ => self.value(field).to_string(),
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.field {
            FormField::Category => {
                let current = self.form.category.parse::<GoalCategory>().ok();
                self.form.category = cycle(&GoalCategory::ALL, current, forward).as_str().to_string();
            }
            FormField::Status => {
                let current = self.form.status.parse::<GoalStatus>().ok();
                self.form.status = cycle(&GoalStatus::ALL, current, forward).as_str().to_string();
            }
            _ => {}
        }
    }

    fn is_choice(&self) -> bool {
        matches!(self.field, FormField::Category | FormField::Status)
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.form.title),
            FormField::Description => Some(&mut self.form.description),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.field = self.field.step(true),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.step(false),
            KeyCode::Left => self.cycle_choice(false),
            KeyCode::Right => self.cycle_choice(true),
            KeyCode::Char(' ') if self.is_choice() => self.cycle_choice(true),
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
        FormAction::None
    }
}
