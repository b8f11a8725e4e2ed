use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use scribble_types::Post;

use crate::app::App;
use crate::route::ViewContext;

use super::formatting::{format_timestamp, like_glyph, wrap_contents};
use super::theme::ThemeColors;

/// Render one scribble as display lines. Pure function of its inputs; the
/// caller decides where the lines land.
pub fn post_lines(
    post: &Post,
    owned: bool,
    selected: bool,
    max_width: usize,
    theme: &ThemeColors,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Author line: "username scribbled..."
    let author_style = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);
    let mut header = vec![
        Span::styled(App::display_name(post).to_string(), author_style),
        Span::styled(" scribbled...", Style::default().fg(theme.text_dim)),
    ];
    if owned {
        header.push(Span::styled(
            "  [e]dit",
            Style::default().fg(theme.text_dim),
        ));
    }
    lines.push(Line::from(header));

    let content_style = if selected {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    for wrapped in wrap_contents(&post.contents, max_width) {
        lines.push(Line::from(Span::styled(format!("  {}", wrapped), content_style)));
    }

    // Footer: timestamp and the like control with its current count.
    let heart_style = if post.user_has_liked {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  on {}", format_timestamp(&post.time)),
            Style::default().fg(theme.text_dim),
        ),
        Span::raw("   "),
        Span::styled(like_glyph(post.user_has_liked).to_string(), heart_style),
        Span::styled(
            format!(" {}", post.likes),
            Style::default().fg(theme.text),
        ),
    ]));
    lines.push(Line::from(""));

    lines
}

/// Title for the feed block, from the view context.
fn feed_title(app: &App) -> String {
    match app.ctx {
        ViewContext::Home => " All Scribbles ".to_string(),
        ViewContext::Following => " Following ".to_string(),
        ViewContext::Profile(_) => {
            let name = app
                .follow
                .as_ref()
                .and_then(|p| p.username.clone())
                .unwrap_or_else(|| "profile".to_string());
            format!(" Scribbles by {} ", name)
        }
    }
}

/// Render the follow panel shown above a profile feed.
pub fn render_follow_panel(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
    let Some(panel) = &app.follow else { return };

    let count = |c: Option<i64>| c.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    let label = if panel.is_following { "unfollow" } else { "follow" };
    let label_style = if panel.is_following {
        Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(
                "followers: {}   following: {}   ",
                count(panel.follower_count),
                count(panel.following_count)
            ),
            Style::default().fg(theme.text),
        ),
        Span::styled(format!("[f] {}", label), label_style),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(widget, area);
}

/// Render the feed list. Clear-and-rebuild every frame; the list always
/// shows exactly the posts of the last successful fetch.
pub fn render_feed(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
    let max_width = area.width.saturating_sub(4) as usize;
    let selected = app.feed.list_state.selected();

    let items: Vec<ListItem> = app
        .feed
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let owned = app.viewer == Some(post.owner_id);
            ListItem::new(post_lines(post, owned, selected == Some(i), max_width, theme))
        })
        .collect();

    let title = if app.feed.loading {
        format!("{}(loading...) ", feed_title(app))
    } else {
        feed_title(app)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg));

    frame.render_stateful_widget(list, area, &mut app.feed.list_state);
}
