//! Comment form editor with tui-textarea integration
//!
//! Holds one text area per form field. The text areas own cursor and
//! editing state; their content is mirrored into the `CommentForm` held by
//! the UI state through `UiAction::FormInput`.

use crossterm::event::{KeyCode, KeyEvent};
use libpostboard::view::{CommentForm, Field};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// Stateful editor for the three comment fields
pub struct FormEditor {
    name: TextArea<'static>,
    email: TextArea<'static>,
    body: TextArea<'static>,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_area(field: Field) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(field.placeholder());
    textarea
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            name: empty_area(Field::Name),
            email: empty_area(Field::Email),
            body: empty_area(Field::Body),
        }
    }

    fn area(&self, field: Field) -> &TextArea<'static> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Body => &self.body,
        }
    }

    fn area_mut(&mut self, field: Field) -> &mut TextArea<'static> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Body => &mut self.body,
        }
    }

    /// Current text of a field
    pub fn content(&self, field: Field) -> String {
        self.area(field).lines().join("\n")
    }

    /// Feed a key to a field and return the field's new text
    ///
    /// Name and email are single-line; Enter is ignored there.
    pub fn input(&mut self, field: Field, key: KeyEvent) -> String {
        if key.code == KeyCode::Enter && field != Field::Body {
            return self.content(field);
        }
        self.area_mut(field).input(key);
        self.content(field)
    }

    /// Reset any text area whose content no longer matches the form
    ///
    /// Needed after the form is cleared or the body is emptied by a
    /// successful submission.
    pub fn sync(&mut self, form: &CommentForm) {
        for field in Field::ALL {
            let value = form.value(field);
            if self.content(field) != value {
                *self.area_mut(field) = if value.is_empty() {
                    empty_area(field)
                } else {
                    let mut textarea = TextArea::new(value.lines().map(String::from).collect());
                    textarea.set_placeholder_text(field.placeholder());
                    textarea
                };
            }
        }
    }

    /// Update borders and cursors before rendering
    pub fn prepare(&mut self, form: &CommentForm, active: Field, focused: bool) {
        for field in Field::ALL {
            let shows_error = form.errors.get(field);
            let is_active = focused && field == active;

            let title = if shows_error {
                format!(" {} - {} ", field.label(), field.error_message())
            } else {
                format!(" {} ", field.label())
            };
            let border_style = if shows_error {
                Style::default().fg(Color::Red)
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let cursor_style = if is_active {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };

            let textarea = self.area_mut(field);
            textarea.set_block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
            textarea.set_cursor_style(cursor_style);
            textarea.set_cursor_line_style(Style::default());
        }
    }

    /// Render the fields and the key hints
    pub fn render(&self, frame: &mut Frame, area: Rect, submitting: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Hints
            ])
            .split(area);

        frame.render_widget(&self.name, chunks[0]);
        frame.render_widget(&self.email, chunks[1]);
        frame.render_widget(&self.body, chunks[2]);

        let hints = if submitting {
            Line::styled("Adding comment...", Style::default().fg(Color::Yellow))
        } else {
            Line::styled(
                "Ctrl+S: Add | Ctrl+R: Clear | Tab: Next field | Esc: Close",
                Style::default().fg(Color::Gray),
            )
        };
        frame.render_widget(Paragraph::new(hints), chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_returns_field_text() {
        let mut editor = FormEditor::new();
        editor.input(Field::Name, key(KeyCode::Char('A')));
        let text = editor.input(Field::Name, key(KeyCode::Char('b')));

        assert_eq!(text, "Ab");
        assert_eq!(editor.content(Field::Email), "");
    }

    #[test]
    fn test_enter_ignored_in_single_line_fields() {
        let mut editor = FormEditor::new();
        editor.input(Field::Email, key(KeyCode::Char('x')));
        let text = editor.input(Field::Email, key(KeyCode::Enter));
        assert_eq!(text, "x");

        editor.input(Field::Body, key(KeyCode::Char('a')));
        editor.input(Field::Body, key(KeyCode::Enter));
        let text = editor.input(Field::Body, key(KeyCode::Char('b')));
        assert_eq!(text, "a\nb");
    }

    #[test]
    fn test_sync_clears_emptied_body() {
        let mut editor = FormEditor::new();
        editor.input(Field::Name, key(KeyCode::Char('A')));
        editor.input(Field::Body, key(KeyCode::Char('h')));

        let mut form = CommentForm::new();
        form.name = "A".to_string();
        editor.sync(&form);

        assert_eq!(editor.content(Field::Name), "A");
        assert_eq!(editor.content(Field::Body), "");
    }
}
