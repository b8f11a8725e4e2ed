use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::PaginationState;

use super::theme::ThemeColors;

/// Build the pagination bar. Disabled directions render dimmed, exactly
/// tracking the state's button predicates.
pub fn pagination_line(state: &PaginationState, theme: &ThemeColors) -> Line<'static> {
    let enabled = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(theme.text_dim);

    Line::from(vec![
        Span::styled(
            "\u{ab} [p]rev",
            if state.prev_enabled() { enabled } else { disabled },
        ),
        Span::styled(
            format!("   page {}/{}   ", state.current_page, state.total_pages),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            "[n]ext \u{bb}",
            if state.next_enabled() { enabled } else { disabled },
        ),
    ])
}

pub fn render_pagination(frame: &mut Frame, state: &PaginationState, theme: &ThemeColors, area: Rect) {
    let widget = Paragraph::new(pagination_line(state, theme)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect::<String>()
    }

    #[test]
    fn bar_shows_page_position() {
        let theme = super::super::theme::theme();
        let state = PaginationState {
            current_page: 2,
            total_pages: 5,
            current_page_count: 10,
        };
        let text = line_text(&pagination_line(&state, &theme));
        assert!(text.contains("page 2/5"));
    }
}
