use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{Notification, NotificationLevel};
use crate::presentation::theme::Theme;

/// Transient toast in the top-right corner.
pub struct NotificationPopup<'a> {
    notification: &'a Notification,
    theme: &'a Theme,
}

impl<'a> NotificationPopup<'a> {
    /// Popup for `notification`.
    #[must_use]
    pub const fn new(notification: &'a Notification, theme: &'a Theme) -> Self {
        Self {
            notification,
            theme,
        }
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = self.notification.message.as_str();

        let max_width = 48.min(area.width.saturating_sub(2));
        let width = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(max_width);
        let inner_width = width.saturating_sub(2).max(1);
        let lines = u16::try_from(message.width())
            .unwrap_or(u16::MAX)
            .div_ceil(inner_width)
            .max(1);
        let height = lines.saturating_add(2).min(6);

        let popup_area = Rect::new(
            area.right().saturating_sub(width).saturating_sub(2),
            area.y + 2,
            width,
            height,
        );
        let popup_area = area.intersection(popup_area);
        if popup_area.area() == 0 {
            return;
        }

        let color = match self.notification.level {
            NotificationLevel::Info => self.theme.accent,
            NotificationLevel::Success => self.theme.success,
            NotificationLevel::Error => self.theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(self.theme.panel_style);

        Clear.render(popup_area, buf);
        Paragraph::new(message)
            .block(block)
            .wrap(Wrap { trim: true })
            .style(self.theme.panel_style.add_modifier(Modifier::BOLD))
            .render(popup_area, buf);
    }
}
