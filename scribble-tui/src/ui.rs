// UI module - split into cohesive submodules for maintainability
pub mod composer;
pub mod feed;
pub mod formatting;
pub mod pagination;
pub mod theme;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use crate::app::App;
    use crate::route::ViewContext;

    use super::composer::render_composer_modal;
    use super::feed::{render_feed, render_follow_panel};
    use super::pagination::render_pagination;
    use super::theme::theme;

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();
        let theme = theme();

        frame.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 50;
        const MIN_HEIGHT: u16 = 14;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );
            frame.render_widget(warning, area);
            return;
        }

        let has_follow_panel = app.follow.is_some();
        let constraints = if has_follow_panel {
            vec![
                Constraint::Length(3), // Follow panel
                Constraint::Min(0),    // Feed
                Constraint::Length(1), // Pagination bar
                Constraint::Length(1), // Status line
            ]
        } else {
            vec![
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        if has_follow_panel {
            render_follow_panel(frame, app, &theme, chunks[idx]);
            idx += 1;
        }

        render_feed(frame, app, &theme, chunks[idx]);
        idx += 1;

        render_pagination(frame, &app.feed.pagination, &theme, chunks[idx]);
        idx += 1;

        // Status line: notice, then error, then key hints.
        let status = if let Some(notice) = &app.notice {
            Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(theme.warning),
            ))
        } else if let Some(error) = &app.feed.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(theme.error),
            ))
        } else {
            let hints = match app.ctx {
                ViewContext::Home => "q: quit | j/k: select | l: like | e: edit | c: compose | n/p: page | r: reload",
                ViewContext::Profile(_) => "q: quit | j/k: select | l: like | e: edit | f: follow | n/p: page | r: reload",
                ViewContext::Following => "q: quit | j/k: select | l: like | e: edit | n/p: page | r: reload",
            };
            Line::from(Span::styled(hints, Style::default().fg(theme.text_dim)))
        };
        frame.render_widget(Paragraph::new(status), chunks[idx]);

        if app.composer.is_open() {
            render_composer_modal(frame, app, &theme, area);
        }
    }
}
