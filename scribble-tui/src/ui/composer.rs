use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use scribble_types::SCRIBBLE_MAX_CHARS;

use crate::app::{App, ComposerMode, CounterLevel};

use super::theme::ThemeColors;

/// Counter color per threshold band: lavender below 260, yellow up to the
/// 280 limit, red beyond it (submission disabled).
pub fn counter_style(level: CounterLevel, theme: &ThemeColors) -> Style {
    match level {
        CounterLevel::Neutral => Style::default().fg(theme.text),
        CounterLevel::Warning => Style::default().fg(theme.warning),
        CounterLevel::Over => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
    }
}

/// Render the composer modal (new scribble or inline edit).
pub fn render_composer_modal(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
    let title = match &app.composer.mode {
        Some(ComposerMode::NewScribble) => " New Scribble ",
        Some(ComposerMode::EditPost { .. }) => " Edit Scribble ",
        None => return,
    };

    let modal_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));

    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let modal_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Character counter
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    frame.render_widget(&app.composer.textarea, modal_chunks[0]);

    let count = app.composer.char_count();
    let level = app.composer.level();
    let counter_text = if level.submit_enabled() {
        format!("{}/{} characters", count, SCRIBBLE_MAX_CHARS)
    } else {
        format!("{}/{} characters - over the limit", count, SCRIBBLE_MAX_CHARS)
    };
    let counter = Paragraph::new(Line::from(Span::styled(
        counter_text,
        counter_style(level, theme),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(counter, modal_chunks[1]);

    let instructions = if level.submit_enabled() {
        "Enter: Send | Esc: Cancel"
    } else {
        "Shorten to send | Esc: Cancel"
    };
    let instructions_widget = Paragraph::new(instructions)
        .style(Style::default().fg(theme.text_dim))
        .alignment(Alignment::Center);
    frame.render_widget(instructions_widget, modal_chunks[2]);
}

/// Centered sub-rectangle by percentage, for modals.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
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
