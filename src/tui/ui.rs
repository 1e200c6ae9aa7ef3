//! UI rendering for the TUI.

use std::path::PathBuf;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::shifter::{LogEntry, LogLevel, SessionState, UPDATE_ACTION};

/// A snapshot of what the main screen shows.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub log: Vec<LogEntry>,
    pub file: Option<PathBuf>,
    /// Table, column and scope an update works on.
    pub target: String,
    pub state: SessionState,
    pub can_update: bool,
    pub status: Option<String>,
}

/// Render the main screen.
pub fn render(frame: &mut Frame<'_>, screen: &Screen) {
    // Create layout: header, log, buttons, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Log
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, screen, chunks[0]);
    render_log(frame, screen, chunks[1]);
    render_buttons(frame, screen, chunks[2]);
    render_status_bar(frame, screen, chunks[3]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let file = screen
        .file
        .as_ref()
        .map_or_else(|| "no file".to_string(), |p| p.display().to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(file, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  ({})", screen.state),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {}", screen.target),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .title(" DateFixer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the operation log, scrolled so the newest line is visible.
fn render_log(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let lines: Vec<Line<'_>> = screen
        .log
        .iter()
        .flat_map(|entry| {
            let (marker, style) = level_style(entry.level);
            wrap_text(&format!("{marker} {}", entry.message), width)
                .into_iter()
                .map(move |text| Line::from(Span::styled(text, style)))
        })
        .collect();

    let visible = usize::from(area.height.saturating_sub(2));
    let offset = u16::try_from(lines.len().saturating_sub(visible)).unwrap_or(u16::MAX);

    let log = Paragraph::new(lines).scroll((offset, 0)).block(
        Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    frame.render_widget(log, area);
}

fn level_style(level: LogLevel) -> (&'static str, Style) {
    match level {
        LogLevel::Info => ("·", Style::default()),
        LogLevel::Warn => ("!", Style::default().fg(Color::Yellow)),
        LogLevel::Error => ("✗", Style::default().fg(Color::Red)),
    }
}

/// Render the button bar.
fn render_buttons(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let update_style = if screen.can_update {
        enabled
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    };

    let buttons = Paragraph::new(Line::from(vec![
        Span::styled("[o] Open chat database", enabled),
        Span::raw("   "),
        Span::styled(format!("[u] {UPDATE_ACTION}"), update_style),
        Span::raw("   "),
        Span::styled("[q] Exit", enabled),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(buttons, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let status_text = screen.status.as_deref().unwrap_or("o:open | u:update | q:exit");
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Break `text` into lines at most `width` terminal columns wide.
///
/// Splits on whitespace; words longer than a line are cut. Wide characters
/// count as two columns.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        if used > 0 && used + 1 + word.width() > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used > 0 && used + ch_width > width {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(ch);
            used += ch_width;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
