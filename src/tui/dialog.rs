//! Modal dialogs: text input, number input and yes/no confirmation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// What a dialog asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Free text, such as a file path.
    Text,
    /// A whole number, possibly negative.
    Integer,
    /// Yes or no.
    Confirm,
}

/// Result of feeding a key to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// Still waiting for input.
    Pending,
    /// Enter pressed on an input dialog.
    Submitted(String),
    /// Answer to a confirmation.
    Answered(bool),
    /// Esc pressed.
    Cancelled,
}

/// A modal dialog drawn over the main screen.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub value: String,
    pub error: Option<String>,
}

impl Dialog {
    /// Text input, pre-filled with `initial`.
    pub fn text(title: impl Into<String>, message: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Text,
            title: title.into(),
            message: message.into(),
            value: initial.into(),
            error: None,
        }
    }

    /// Number input, pre-filled with `default` if given.
    pub fn integer(title: impl Into<String>, message: impl Into<String>, default: Option<i64>) -> Self {
        Self {
            kind: DialogKind::Integer,
            title: title.into(),
            message: message.into(),
            value: default.map(|d| d.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    /// Yes/no question.
    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            title: title.into(),
            message: message.into(),
            value: String::new(),
            error: None,
        }
    }

    /// Feed one key press to the dialog.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => DialogResult::Cancelled,
                KeyCode::Char('u') => {
                    self.value.clear();
                    DialogResult::Pending
                }
                _ => DialogResult::Pending,
            };
        }

        if self.kind == DialogKind::Confirm {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => DialogResult::Answered(true),
                KeyCode::Char('n' | 'N') => DialogResult::Answered(false),
                KeyCode::Esc => DialogResult::Cancelled,
                _ => DialogResult::Pending,
            };
        }

        match key.code {
            KeyCode::Esc => DialogResult::Cancelled,
            KeyCode::Enter => DialogResult::Submitted(self.value.trim().to_string()),
            KeyCode::Backspace => {
                self.value.pop();
                self.error = None;
                DialogResult::Pending
            }
            KeyCode::Char(c) if self.accepts(c) => {
                self.value.push(c);
                self.error = None;
                DialogResult::Pending
            }
            _ => DialogResult::Pending,
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            DialogKind::Text => !c.is_control(),
            DialogKind::Integer => c.is_ascii_digit() || (c == '-' && self.value.is_empty()),
            DialogKind::Confirm => false,
        }
    }

    fn hint(&self) -> &'static str {
        match self.kind {
            DialogKind::Confirm => "y: Yes | n: No | Esc: Cancel",
            _ => "Enter: OK | Esc: Cancel | Ctrl+U: Clear",
        }
    }
}

/// Draw `dialog` centered over whatever is already on screen.
pub fn render_dialog(frame: &mut Frame<'_>, dialog: &Dialog) {
    let area = centered_rect(70, 11, frame.area());

    let mut lines = vec![Line::from(dialog.message.as_str()), Line::from("")];
    if dialog.kind != DialogKind::Confirm {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Green)),
            Span::styled(
                format!("{}_", dialog.value),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some(ref error) = dialog.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        dialog.hint(),
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {} ", dialog.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
