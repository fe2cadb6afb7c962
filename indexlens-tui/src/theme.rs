//! Color tokens for the dashboard.
//!
//! Chart colors come from the core label tables as [`Rgba`]; everything else
//! (chrome, tones, highlights) is defined here.

use ratatui::style::{Color, Modifier, Style};

use indexlens_core::labels::Rgba;
use indexlens_core::views::Tone;

pub const ACCENT: Color = Color::Rgb(37, 99, 235);
pub const POSITIVE: Color = Color::Rgb(22, 163, 74);
pub const NEGATIVE: Color = Color::Rgb(220, 38, 38);
/// Japan markers and Japanese constituents.
pub const HIGHLIGHT: Color = Color::Rgb(234, 88, 12);
pub const MUTED: Color = Color::Rgb(148, 163, 184);
pub const TEXT: Color = Color::Rgb(226, 232, 240);

/// Terminal color for a chart color. Alpha is dropped.
pub fn rgba(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn tone(tone: Tone) -> Style {
    match tone {
        Tone::Positive => Style::default().fg(POSITIVE),
        Tone::Negative => Style::default().fg(NEGATIVE),
        Tone::Neutral => muted(),
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn highlight() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn added() -> Style {
    Style::default().fg(POSITIVE).add_modifier(Modifier::BOLD)
}

pub fn removed() -> Style {
    Style::default().fg(NEGATIVE).add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn error() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Swatch block colored like a chart slice.
pub fn swatch(color: Rgba) -> Style {
    Style::default().fg(rgba(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexlens_core::labels::{sector_color, FALLBACK};

    #[test]
    fn rgba_drops_alpha() {
        assert_eq!(rgba(Rgba::new(1, 2, 3, 0.5)), Color::Rgb(1, 2, 3));
        assert_eq!(rgba(FALLBACK), Color::Rgb(148, 163, 184));
    }

    #[test]
    fn sector_colors_map_through() {
        let c = sector_color("Energy");
        assert_eq!(swatch(c).fg, Some(Color::Rgb(c.r, c.g, c.b)));
    }

    #[test]
    fn tones() {
        assert_eq!(tone(Tone::Positive).fg, Some(POSITIVE));
        assert_eq!(tone(Tone::Negative).fg, Some(NEGATIVE));
        assert_eq!(tone(Tone::Neutral).fg, Some(MUTED));
    }

    #[test]
    fn active_panel_is_accented() {
        assert_eq!(panel_border(true).fg, Some(ACCENT));
        assert_eq!(panel_border(false).fg, Some(MUTED));
    }
}
