use ratatui::style::Color;

pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

/// The fixed palette. Lavender on near-black, matching the site's look.
pub fn theme() -> ThemeColors {
    ThemeColors {
        primary: Color::Rgb(180, 160, 255),     // Lavender
        accent: Color::Rgb(255, 120, 160),      // Pink (liked hearts)
        text: Color::Rgb(220, 215, 240),        // Lavender-white
        text_dim: Color::Rgb(120, 115, 140),    // Muted gray-violet
        background: Color::Rgb(18, 16, 24),     // Near-black violet
        border: Color::Rgb(70, 64, 96),
        warning: Color::Rgb(255, 220, 90),      // Counter warning band
        error: Color::Rgb(255, 95, 95),         // Counter over-limit, errors
        highlight_bg: Color::Rgb(38, 34, 54),   // Selected post row
    }
}
