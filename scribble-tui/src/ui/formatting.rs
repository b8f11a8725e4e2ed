use chrono::{DateTime, Utc};

/// Format a post timestamp the way the site does: `DD-MM-YYYY @ HH:MM`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d-%m-%Y @ %H:%M").to_string()
}

/// Heart glyph for the like control.
pub fn like_glyph(user_has_liked: bool) -> &'static str {
    if user_has_liked {
        "\u{2665}" // ♥
    } else {
        "\u{2661}" // ♡
    }
}

/// Wrap post contents to the available width.
pub fn wrap_contents(contents: &str, max_width: usize) -> Vec<String> {
    let wrap_width = max_width.saturating_sub(4).max(10);
    let mut lines = Vec::new();
    for line in contents.lines() {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        for wrapped in textwrap::wrap(line, wrap_width) {
            lines.push(wrapped.to_string());
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_matches_site_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "07-03-2024 @ 09:05");
    }

    #[test]
    fn glyph_tracks_liked_state() {
        assert_eq!(like_glyph(true), "\u{2665}");
        assert_eq!(like_glyph(false), "\u{2661}");
    }

    #[test]
    fn wrapping_preserves_blank_lines() {
        let lines = wrap_contents("a\n\nb", 40);
        assert_eq!(lines, vec!["a".to_string(), String::new(), "b".to_string()]);
    }
}
