use super::adapter::ColorConverter;
use crate::infrastructure::config::ThemeMode;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const DEFAULT_ACCENT: Color = Color::Rgb(31, 106, 165);

/// Styles derived from one accent color and a light or dark base.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Dark or light base.
    pub mode: ThemeMode,
    /// Accent color everything else is tinted from.
    pub accent: Color,
    /// Default foreground and background.
    pub base_style: Style,
    /// Background of sidebar, header and footer panels.
    pub panel_style: Style,
    /// Border of unfocused blocks.
    pub border_style: Style,
    /// Border of the focused block.
    pub focused_border_style: Style,
    /// Highlighted list entry or grid row.
    pub selection_style: Style,
    /// Grid column headers and titles.
    pub header_style: Style,
    /// Placeholders, hints and disabled inputs.
    pub dimmed_style: Style,
    /// Success toast color.
    pub success: Color,
    /// Error dialog and toast color.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(DEFAULT_ACCENT, ThemeMode::Dark)
    }
}

impl Theme {
    /// Builds a theme from a color name or hex code. Unparsable input falls
    /// back to the default accent.
    pub fn new(accent_color_str: &str, mode: ThemeMode) -> Self {
        Self::from_color(parse_color(accent_color_str), mode)
    }

    /// Builds a theme from an already parsed accent.
    #[must_use]
    pub fn from_color(accent: Color, mode: ThemeMode) -> Self {
        let (fg, bg, panel_l, dim) = match mode {
            ThemeMode::Dark => (Color::Rgb(220, 220, 220), Color::Rgb(36, 36, 36), 0.18, Color::DarkGray),
            ThemeMode::Light => (Color::Rgb(30, 30, 30), Color::Rgb(235, 235, 235), 0.88, Color::Gray),
        };

        let panel_bg = ColorConverter::tint(accent, panel_l, 0.08);
        let selection_bg = match mode {
            ThemeMode::Dark => ColorConverter::tint(accent, 0.3, 0.45),
            ThemeMode::Light => ColorConverter::tint(accent, 0.78, 0.55),
        };

        Self {
            mode,
            accent,
            base_style: Style::default().fg(fg).bg(bg),
            panel_style: Style::default().fg(fg).bg(panel_bg),
            border_style: Style::default().fg(dim),
            focused_border_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            selection_style: Style::default()
                .bg(selection_bg)
                .fg(ColorConverter::contrast(selection_bg)),
            header_style: Style::default()
                .bg(accent)
                .fg(ColorConverter::contrast(accent))
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(dim),
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Same accent in the other mode.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self::from_color(self.accent, self.mode.toggled())
    }

    /// Border style for a block, depending on focus.
    #[must_use]
    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border_style
        } else {
            self.border_style
        }
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    DEFAULT_ACCENT
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => {
            let short = |i: usize| channel(&s[i..=i]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
