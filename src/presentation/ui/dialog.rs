//! Modal dialogs: error messages and yes/no confirmation.

use std::collections::VecDeque;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use parking_lot::Mutex;
use ratatui::{
    DefaultTerminal,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use tracing::debug;

use crate::domain::AlertPort;
use crate::domain::keybinding::{Action, dialog_bindings, resolve};
use crate::presentation::events::is_key_press;
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::centered_fixed;

const DIALOG_WIDTH: u16 = 56;

/// A pending error dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Dialog title.
    pub title: String,
    /// Error text.
    pub message: String,
}

/// Error dialogs waiting to be shown, oldest first. Serves as the alert sink
/// for the database gateway.
#[derive(Debug, Default)]
pub struct DialogQueue {
    pending: Mutex<VecDeque<ErrorMessage>>,
}

impl DialogQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialog currently on screen.
    #[must_use]
    pub fn front(&self) -> Option<ErrorMessage> {
        self.pending.lock().front().cloned()
    }

    /// Closes the dialog on screen, revealing the next one.
    pub fn dismiss(&self) {
        self.pending.lock().pop_front();
    }

    /// Whether no dialog is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Number of pending dialogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }
}

impl AlertPort for DialogQueue {
    fn alert(&self, title: &str, message: &str) {
        debug!(title, "Queueing error dialog");
        self.pending.lock().push_back(ErrorMessage {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

fn dialog_area(message: &str, area: Rect) -> Rect {
    let inner_width = usize::from(DIALOG_WIDTH - 4);
    let lines = u16::try_from(message.chars().count().div_ceil(inner_width).max(1)).unwrap_or(8);
    centered_fixed(DIALOG_WIDTH, lines.min(8) + 4, area)
}

fn render_dialog(
    title: &str,
    message: &str,
    hint: Line<'_>,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let area = dialog_area(message, area);
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border_style)
        .style(theme.panel_style)
        .title(format!(" {title} "));
    let inner = block.inner(area);
    block.render(area, buf);

    let [body, _, footer] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .render(body, buf);
    Paragraph::new(hint).centered().render(footer, buf);
}

fn key_hint<'a>(key: &'a str, label: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!(" {key} "), theme.header_style),
        Span::styled(format!(" {label} "), theme.dimmed_style),
    ]
}

/// Modal error box dismissed with Enter or Esc.
pub struct ErrorDialog<'a> {
    error: &'a ErrorMessage,
    theme: &'a Theme,
}

impl<'a> ErrorDialog<'a> {
    /// Dialog for `error`.
    #[must_use]
    pub const fn new(error: &'a ErrorMessage, theme: &'a Theme) -> Self {
        Self { error, theme }
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hint = Line::from(key_hint("Enter", "OK", self.theme));
        let theme = Theme {
            focused_border_style: self.theme.focused_border_style.fg(self.theme.error),
            ..*self.theme
        };
        render_dialog(
            &self.error.title,
            &self.error.message,
            hint,
            &theme,
            area,
            buf,
        );
    }
}

/// Modal yes/no question.
pub struct ConfirmDialog<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Dialog asking `message`.
    #[must_use]
    pub const fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = key_hint("y", "Yes", self.theme);
        spans.push(Span::raw("  "));
        spans.extend(key_hint("n", "No", self.theme));
        render_dialog(
            "Confirm",
            self.message,
            Line::from(spans).style(self.theme.panel_style.add_modifier(Modifier::BOLD)),
            self.theme,
            area,
            buf,
        );
    }
}

/// Shows a single error dialog on an otherwise empty screen until it is
/// dismissed. Used when the application cannot start.
///
/// # Errors
/// Returns error if drawing or reading terminal events fails.
pub async fn show_startup_error(
    terminal: &mut DefaultTerminal,
    theme: &Theme,
    error: &ErrorMessage,
) -> color_eyre::Result<()> {
    let bindings = dialog_bindings();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(theme.base_style), area);
            frame.render_widget(ErrorDialog::new(error, theme), area);
        })?;

        match events.next().await {
            Some(Ok(Event::Key(key))) if is_key_press(&key) => {
                if matches!(
                    resolve(&bindings, &key),
                    Some(Action::Confirm | Action::Cancel)
                ) {
                    return Ok(());
                }
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
            None => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_text(buf: &Buffer) -> String {
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue = DialogQueue::new();
        queue.alert("Database Error", "first");
        queue.alert("Database Error", "second");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.front().unwrap().message, "first");
        queue.dismiss();
        assert_eq!(queue.front().unwrap().message, "second");
        queue.dismiss();
        assert!(queue.is_empty());
        queue.dismiss();
        assert!(queue.front().is_none());
    }

    #[test]
    fn test_error_dialog_render() {
        let error = ErrorMessage {
            title: "Database Error".to_string(),
            message: "no such table: Service".to_string(),
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ErrorDialog::new(&error, &Theme::default()).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains(" Database Error "));
        assert!(text.contains("no such table: Service"));
        assert!(text.contains("Enter"));
    }

    #[test]
    fn test_confirm_dialog_render() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ConfirmDialog::new("Delete this record?", &Theme::default()).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("Delete this record?"));
        assert!(text.contains(" y  Yes "));
        assert!(text.contains(" n  No "));
    }
}
