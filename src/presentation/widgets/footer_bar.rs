use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Region that currently receives keys; selects the footer hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// Navigation sidebar.
    #[default]
    Sidebar,
    /// An entity form input.
    Form,
    /// The search box.
    Search,
    /// The record grid.
    Grid,
    /// A modal dialog.
    Dialog,
}

impl FocusContext {
    /// Short label shown at the left of the footer.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sidebar => "MENU",
            Self::Form => "FORM",
            Self::Search => "SEARCH",
            Self::Grid => "RECORDS",
            Self::Dialog => "DIALOG",
        }
    }
}

/// Footer colors.
pub struct FooterBarStyle {
    /// Bar background.
    pub background: Style,
    /// Binding labels.
    pub label_style: Style,
    /// Key chips.
    pub key_style: Style,
    /// Right-aligned info text.
    pub info: Style,
    /// Focus context chip.
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    /// Derives the footer colors from `theme`.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let key_bg = ColorConverter::tint(theme.accent, 0.12, 0.4);

        Self {
            background: theme.panel_style,
            label_style: theme.header_style,
            key_style: Style::default()
                .bg(key_bg)
                .fg(ColorConverter::contrast(key_bg)),
            info: theme.dimmed_style,
            focus_indicator: Style::default()
                .bg(key_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Bottom bar listing the visible key bindings.
pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus_context: Option<FocusContext>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    /// Footer over `keybindings`; hidden bindings are skipped.
    #[must_use]
    pub fn new(keybindings: &'a [Keybind], theme: &Theme) -> Self {
        Self {
            keybindings,
            focus_context: None,
            right_info: None,
            style: FooterBarStyle::from_theme(theme),
        }
    }

    /// Shows the focus context chip.
    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    /// Text drawn at the right edge.
    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    fn format_key(key: &KeyEvent) -> String {
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }

        match key.code {
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::Left => s.push('←'),
            KeyCode::Right => s.push('→'),
            other => s.push_str(&format!("{other:?}")),
        }
        s
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self
            .keybindings
            .iter()
            .filter(|k| k.visible_in_bar)
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        buf.set_style(Rect::new(area.x, area.y, area.width, 1), self.style.background);

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.width()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
            Paragraph::new(Span::styled(info, self.style.info)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keybinding::{global_bindings, record_bindings};

    fn rendered(bar: FooterBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn test_format_key() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(FooterBar::format_key(&ctrl_a), "C-a");
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(FooterBar::format_key(&tab), "Tab");
    }

    #[test]
    fn test_hidden_bindings_are_not_shown() {
        let bindings = global_bindings();
        let text = rendered(FooterBar::new(&bindings, &Theme::default()), 80);
        assert!(text.contains("Quit"));
        assert!(!text.contains("Back"));
    }

    #[test]
    fn test_focus_context_and_right_info() {
        let bindings = record_bindings();
        let bar = FooterBar::new(&bindings, &Theme::default())
            .focus_context(FocusContext::Form)
            .right_info(Some("Services"));
        let text = rendered(bar, 100);
        assert!(text.starts_with(" FORM "));
        assert!(text.contains("C-a"));
        assert!(text.trim_end().ends_with("Services"));
    }
}
