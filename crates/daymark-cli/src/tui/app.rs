use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use daymark_core::Clock;

use crate::plan::DisplayRow;

/// Which stage of the review flow is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Table,
    Form,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
    Confirm,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Start => Field::End,
            Field::End => Field::Confirm,
            Field::Confirm => Field::Start,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Start => Field::Confirm,
            Field::End => Field::Start,
            Field::Confirm => Field::End,
        }
    }
}

/// What the review produced: the window input and whether the user accepted.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub start: String,
    pub end: String,
    pub confirm: bool,
}

/// Review state: commit table first, then the start/end/confirm form.
pub struct App<'a> {
    pub rows: &'a [DisplayRow],
    pub total_effort: i64,
    pub stage: Stage,
    pub field: Field,
    pub start_value: String,
    pub end_value: String,
    pub confirm: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub cancelled: bool,
    pub done: bool,
}

impl<'a> App<'a> {
    pub fn new(
        rows: &'a [DisplayRow],
        total_effort: i64,
        start_value: String,
        end_value: String,
    ) -> Self {
        Self {
            rows,
            total_effort,
            stage: Stage::Table,
            field: Field::Start,
            start_value,
            end_value,
            confirm: false,
            error: None,
            selected: 0,
            cancelled: false,
            done: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.cancelled = true;
            return;
        }
        match self.stage {
            Stage::Table => self.handle_table_key(key),
            Stage::Form => self.handle_form_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.stage = Stage::Form,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Enter => match self.field {
                Field::Confirm => self.submit(),
                _ => self.field = self.field.next(),
            },
            KeyCode::Backspace => {
                if let Some(value) = self.active_value_mut() {
                    value.pop();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if self.field == Field::Confirm {
                    self.confirm = !self.confirm;
                }
            }
            KeyCode::Char(c) => match self.field {
                Field::Confirm => match c {
                    'y' | 'Y' => self.confirm = true,
                    'n' | 'N' => self.confirm = false,
                    ' ' => self.confirm = !self.confirm,
                    _ => {}
                },
                _ => {
                    if c.is_ascii_digit() || c == ':' {
                        if let Some(value) = self.active_value_mut() {
                            value.push(c);
                        }
                    }
                }
            },
            _ => {}
        }
    }

    fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Start => Some(&mut self.start_value),
            Field::End => Some(&mut self.end_value),
            Field::Confirm => None,
        }
    }

    /// Validate the clocks; invalid input keeps the form open with an error.
    fn submit(&mut self) {
        match (
            Clock::parse(&self.start_value),
            Clock::parse(&self.end_value),
        ) {
            (Ok(start), Ok(end)) => {
                if (end.hour, end.minute) <= (start.hour, start.minute) {
                    self.error = Some("end time must be after start time".into());
                } else {
                    self.error = None;
                    self.done = true;
                }
            }
            (Err(e), _) | (_, Err(e)) => self.error = Some(e.to_string()),
        }
    }

    pub fn outcome(&self) -> ReviewOutcome {
        ReviewOutcome {
            start: self.start_value.clone(),
            end: self.end_value.clone(),
            confirm: self.confirm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn form_app(rows: &[DisplayRow]) -> App<'_> {
        let mut app = App::new(rows, 0, String::new(), String::new());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.stage, Stage::Form);
        app
    }

    #[test]
    fn enter_moves_from_table_to_form() {
        let mut app = App::new(&[], 0, String::new(), "17:00".into());
        assert_eq!(app.stage, Stage::Table);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.stage, Stage::Form);
    }

    #[test]
    fn esc_cancels_in_any_stage() {
        let mut app = App::new(&[], 0, String::new(), String::new());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.cancelled);

        let mut app = form_app(&[]);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.cancelled);
    }

    #[test]
    fn typing_fills_the_focused_field_and_ignores_junk() {
        let mut app = form_app(&[]);
        type_str(&mut app, "0x9:3a0");
        assert_eq!(app.start_value, "09:30");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.start_value, "09:3");
    }

    #[test]
    fn tab_cycles_through_the_fields() {
        let mut app = form_app(&[]);
        assert_eq!(app.field, Field::Start);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.field, Field::End);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.field, Field::Confirm);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.field, Field::End);
    }

    #[test]
    fn invalid_clock_keeps_the_form_open() {
        let mut app = form_app(&[]);
        type_str(&mut app, "99:99");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "17:00");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.done);
        assert_eq!(app.error.as_deref(), Some("time must be HH:MM"));
    }

    #[test]
    fn end_must_come_after_start() {
        let mut app = form_app(&[]);
        type_str(&mut app, "17:00");
        app.handle_key(key(KeyCode::Tab));
        type_str(&mut app, "09:00");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.done);
        assert_eq!(
            app.error.as_deref(),
            Some("end time must be after start time")
        );
    }

    #[test]
    fn valid_submission_completes_with_the_typed_window() {
        let mut app = form_app(&[]);
        type_str(&mut app, "09:00");
        app.handle_key(key(KeyCode::Enter)); // advance to End
        type_str(&mut app, "17:00");
        app.handle_key(key(KeyCode::Enter)); // advance to Confirm
        app.handle_key(key(KeyCode::Char('y')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.done);
        let outcome = app.outcome();
        assert_eq!(outcome.start, "09:00");
        assert_eq!(outcome.end, "17:00");
        assert!(outcome.confirm);
    }
}
