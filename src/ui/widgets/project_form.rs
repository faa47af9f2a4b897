//! New-project form: three inputs plus validation.

use crate::config::FormConfig;
use crate::domain::validation::{parse_number, Validatable};
use crate::error::{FormError, FormField};
use crate::ui::widgets::text_input::{TextInputAction, TextInputState, TextInputWidget};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear},
};

/// Notice shown for any rejected submission
pub const INVALID_INPUT_NOTICE: &str = "Invalid input, please try again!";

/// Validated form values, ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// Outcome of a key press in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    /// All fields valid; inputs are left untouched until [`ProjectForm::clear`]
    Submit(ProjectInput),
    /// Validation failed; the notice is set and inputs are kept
    Rejected(FormError),
    Cancel,
}

/// State of the new-project form
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub title: TextInputState,
    pub description: TextInputState,
    pub people: TextInputState,
    focus: FormField,
    /// Notice from the last rejected submission
    pub error: Option<String>,
    rules: FormConfig,
}

impl ProjectForm {
    pub fn new(rules: FormConfig) -> Self {
        Self {
            title: TextInputState::new(),
            description: TextInputState::new(),
            people: TextInputState::new(),
            focus: FormField::Title,
            error: None,
            rules,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::People,
            FormField::People => FormField::Title,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::People,
            FormField::Description => FormField::Title,
            FormField::People => FormField::Description,
        };
    }

    fn focused_input(&mut self) -> &mut TextInputState {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::People => &mut self.people,
        }
    }

    /// Route a key to the focused input or the form itself
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                return FormAction::None;
            }
            _ => {}
        }

        match self.focused_input().handle_key(key) {
            TextInputAction::Submit => self.submit(),
            TextInputAction::Cancel => FormAction::Cancel,
            TextInputAction::Changed => {
                self.error = None;
                FormAction::None
            }
            TextInputAction::None => FormAction::None,
        }
    }

    /// Validate the inputs, setting the notice on failure
    pub fn submit(&mut self) -> FormAction {
        match self.collect_input() {
            Ok(input) => {
                self.error = None;
                FormAction::Submit(input)
            }
            Err(err) => {
                tracing::warn!(field = %err.field, reason = %err.source, "project input rejected");
                self.error = Some(INVALID_INPUT_NOTICE.to_string());
                self.focus = err.field;
                FormAction::Rejected(err)
            }
        }
    }

    /// Check every field and build the store input
    pub fn collect_input(&self) -> Result<ProjectInput, FormError> {
        let rules = &self.rules;
        let title = self.title.value().trim();
        let description = self.description.value().trim();

        Validatable::text(title)
            .required()
            .validate()
            .map_err(|source| FormError {
                field: FormField::Title,
                source,
            })?;

        Validatable::text(description)
            .required()
            .length(rules.description_min_length, rules.description_max_length)
            .validate()
            .map_err(|source| FormError {
                field: FormField::Description,
                source,
            })?;

        let people_err = |source| FormError {
            field: FormField::People,
            source,
        };
        let people = parse_number(self.people.value()).map_err(people_err)?;
        Validatable::number(people)
            .required()
            .range(i64::from(rules.min_people), i64::from(rules.max_people))
            .validate()
            .map_err(people_err)?;

        Ok(ProjectInput {
            title: title.to_string(),
            description: description.to_string(),
            // In range, and the range is within u32
            people: people as u32,
        })
    }

    /// Empty every input and return focus to the title
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
        self.error = None;
        self.focus = FormField::Title;
    }
}

/// Dialog rendering a [`ProjectForm`]
pub struct ProjectFormDialog<'a> {
    form: &'a ProjectForm,
}

impl<'a> ProjectFormDialog<'a> {
    pub fn new(form: &'a ProjectForm) -> Self {
        Self { form }
    }
}

impl Widget for ProjectFormDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Add Project ");
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // People
                Constraint::Length(1), // Error
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .split(inner);

        let form = self.form;
        let rules = &form.rules;
        let description_hint = format!(
            "{}-{} characters",
            rules.description_min_length, rules.description_max_length
        );
        let people_hint = format!("{}-{}", rules.min_people, rules.max_people);

        let fields: [(&TextInputState, FormField, &str); 3] = [
            (&form.title, FormField::Title, "Project title"),
            (&form.description, FormField::Description, &description_hint),
            (&form.people, FormField::People, &people_hint),
        ];
        for (row, (input, field, placeholder)) in fields.into_iter().enumerate() {
            TextInputWidget::new(input.value(), input.cursor)
                .title(field.label())
                .placeholder(placeholder)
                .focused(form.focus == field)
                .render(rows[row], buf);
        }

        if let Some(ref error) = form.error {
            buf.set_stringn(
                rows[3].x + 1,
                rows[3].y,
                error,
                rows[3].width.saturating_sub(1) as usize,
                Style::default().fg(Color::Red),
            );
        }

        buf.set_stringn(
            rows[5].x + 1,
            rows[5].y,
            "Tab: Next field | Enter: Add | Esc: Cancel",
            rows[5].width.saturating_sub(1) as usize,
            Style::default().fg(Color::DarkGray),
        );
    }
}
