use crate::domain::ConnectionStatus;
use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

trait ConnectionStatusExt {
    fn display_text(self) -> &'static str;
    fn indicator(self) -> &'static str;
}

impl ConnectionStatusExt for ConnectionStatus {
    fn display_text(self) -> &'static str {
        match self {
            Self::Disconnected => "DB OFFLINE",
            Self::Connecting => "DB CONNECTING",
            Self::Connected => "DB ONLINE",
            Self::Reconnecting => "DB RECONNECTING",
            Self::Error => "DB ERROR",
        }
    }

    fn indicator(self) -> &'static str {
        match self {
            Self::Connected => "●",
            Self::Connecting | Self::Reconnecting => "◐",
            Self::Disconnected | Self::Error => "○",
        }
    }
}

/// Header colors.
pub struct HeaderBarStyle {
    /// Bar background.
    pub background: Style,
    /// Application name.
    pub app_name: Style,
    /// Version chip.
    pub version: Style,
    /// Current screen name.
    pub title: Style,
    /// Connected badge.
    pub status_ok: Style,
    /// Connecting or reconnecting badge.
    pub status_pending: Style,
    /// Disconnected or failed badge.
    pub status_down: Style,
}

impl HeaderBarStyle {
    /// Derives the header colors from `theme`.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let version_bg = ColorConverter::tint(theme.accent, 0.12, 0.4);
        let badge = |bg: Color| {
            Style::default()
                .bg(bg)
                .fg(ColorConverter::contrast(bg))
                .add_modifier(Modifier::BOLD)
        };

        Self {
            background: theme.panel_style,
            app_name: theme.header_style,
            version: Style::default()
                .bg(version_bg)
                .fg(ColorConverter::contrast(version_bg)),
            title: theme.panel_style.add_modifier(Modifier::BOLD),
            status_ok: badge(theme.success),
            status_pending: badge(Color::Yellow),
            status_down: badge(theme.error),
        }
    }
}

/// Top bar with app name, version, screen title and database status.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    title: Option<&'a str>,
    connection_status: ConnectionStatus,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Header for `app_name` at `version`.
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str, theme: &Theme) -> Self {
        Self {
            app_name,
            version,
            title: None,
            connection_status: ConnectionStatus::default(),
            style: HeaderBarStyle::from_theme(theme),
        }
    }

    /// Database status shown at the right edge.
    #[must_use]
    pub const fn connection_status(mut self, status: ConnectionStatus) -> Self {
        self.connection_status = status;
        self
    }

    /// Name of the current screen.
    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    const fn status_style(&self) -> Style {
        match self.connection_status {
            ConnectionStatus::Connected => self.style.status_ok,
            ConnectionStatus::Connecting | ConnectionStatus::Reconnecting => {
                self.style.status_pending
            }
            ConnectionStatus::Disconnected | ConnectionStatus::Error => self.style.status_down,
        }
    }

    fn status_text(&self) -> String {
        format!(
            " {} {} ",
            self.connection_status.indicator(),
            self.connection_status.display_text()
        )
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(Rect::new(area.x, area.y, area.width, 1), self.style.background);

        let mut left_spans = vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::raw(" "),
            Span::styled(format!(" v{} ", self.version), self.style.version),
        ];
        if let Some(title) = self.title {
            left_spans.push(Span::styled(format!("  {title}"), self.style.title));
        }
        let left_line = Line::from(left_spans);
        let left_width = u16::try_from(left_line.width()).unwrap_or(u16::MAX);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(left_line).render(left_area, buf);

        let status = self.status_text();
        let status_width = u16::try_from(status.width()).unwrap_or(u16::MAX);
        if status_width < area.width.saturating_sub(left_width) {
            let right_area = Rect::new(area.right() - status_width, area.y, status_width, 1);
            Paragraph::new(Span::styled(status, self.status_style())).render(right_area, buf);
        }
    }
}
