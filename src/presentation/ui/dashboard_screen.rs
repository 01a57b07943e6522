//! Aggregate count cards.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::application::StatCard;
use crate::application::use_cases::DashboardUseCase;
use crate::presentation::theme::Theme;

const CARD_HEIGHT: u16 = 7;

/// Dashboard contents, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct DashboardScreen {
    cards: Vec<StatCard>,
}

impl DashboardScreen {
    /// Runs the count queries once.
    pub async fn load(use_case: &DashboardUseCase) -> Self {
        Self {
            cards: use_case.load_cards().await,
        }
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[StatCard] {
        &self.cards
    }
}

/// Draws the dashboard cards side by side.
pub struct DashboardView<'a> {
    screen: &'a DashboardScreen,
    theme: &'a Theme,
}

impl<'a> DashboardView<'a> {
    /// View of `screen`.
    #[must_use]
    pub const fn new(screen: &'a DashboardScreen, theme: &'a Theme) -> Self {
        Self { screen, theme }
    }

    fn render_card(&self, card: &StatCard, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.focused_border_style)
            .style(self.theme.panel_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [title_area, _, count_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(inner);

        Paragraph::new(card.title)
            .style(self.theme.dimmed_style)
            .centered()
            .render(title_area, buf);
        Paragraph::new(Line::from(card.count.to_string()))
            .style(
                self.theme
                    .panel_style
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .centered()
            .render(count_area, buf);
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(" Dashboard ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [row] = Layout::vertical([Constraint::Length(CARD_HEIGHT)])
            .flex(Flex::Start)
            .margin(1)
            .areas(inner);

        let columns = Layout::horizontal(vec![Constraint::Fill(1); self.screen.cards.len()])
            .spacing(2)
            .split(row);

        for (card, column) in self.screen.cards.iter().zip(columns.iter()) {
            self.render_card(card, *column, buf);
        }
    }
}
