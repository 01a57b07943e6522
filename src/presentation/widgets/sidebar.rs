//! Navigation menu.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::infrastructure::config::ThemeMode;
use crate::presentation::theme::Theme;

/// Name of the dashboard entry, also its icon file name.
pub const DASHBOARD_LABEL: &str = "Dashboard";

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// The dashboard screen.
    Dashboard,
    /// Entity screen, by display name.
    Entity(&'static str),
    /// The dark mode switch.
    ThemeToggle,
}

#[derive(Debug, Clone)]
struct SidebarEntry {
    item: NavItem,
    icon: Option<String>,
}

/// Sidebar entries, cursor and the entry of the screen being shown.
#[derive(Debug)]
pub struct SidebarState {
    entries: Vec<SidebarEntry>,
    list_state: ListState,
    active: NavItem,
    focused: bool,
}

impl SidebarState {
    /// Dashboard first, then `entities` in order, then the theme switch.
    /// `icon_for` resolves an optional glyph per label.
    pub fn new<'a>(
        entities: impl IntoIterator<Item = &'static str>,
        icon_for: impl Fn(&str) -> Option<&'a str>,
    ) -> Self {
        let mut items = vec![NavItem::Dashboard];
        items.extend(entities.into_iter().map(NavItem::Entity));
        items.push(NavItem::ThemeToggle);

        let entries = items
            .into_iter()
            .map(|item| {
                let icon = match item {
                    NavItem::Dashboard => icon_for(DASHBOARD_LABEL),
                    NavItem::Entity(name) => icon_for(name),
                    NavItem::ThemeToggle => None,
                };
                SidebarEntry {
                    item,
                    icon: icon.map(str::to_string),
                }
            })
            .collect();

        Self {
            entries,
            list_state: ListState::default().with_selected(Some(0)),
            active: NavItem::Dashboard,
            focused: true,
        }
    }

    fn selected_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn selected(&self) -> NavItem {
        self.entries
            .get(self.selected_index())
            .map_or(NavItem::Dashboard, |e| e.item)
    }

    /// Moves the cursor down, stopping at the last entry.
    pub fn select_next(&mut self) {
        let last = self.entries.len().saturating_sub(1);
        self.list_state
            .select(Some((self.selected_index() + 1).min(last)));
    }

    /// Moves the cursor up, stopping at the first entry.
    pub fn select_previous(&mut self) {
        self.list_state
            .select(Some(self.selected_index().saturating_sub(1)));
    }

    /// Moves the cursor to the first entry.
    pub fn select_first(&mut self) {
        self.list_state.select(Some(0));
    }

    /// Moves the cursor to the last entry.
    pub fn select_last(&mut self) {
        self.list_state
            .select(Some(self.entries.len().saturating_sub(1)));
    }

    /// Marks the screen currently shown.
    pub fn set_active(&mut self, item: NavItem) {
        self.active = item;
    }

    /// Entry of the screen being shown.
    #[must_use]
    pub const fn active(&self) -> NavItem {
        self.active
    }

    /// Marks the sidebar as receiving keys.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

/// Navigation list widget.
pub struct Sidebar<'a> {
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    /// Sidebar drawn with `theme`.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn label(&self, entry: &SidebarEntry) -> String {
        let icon = entry.icon.as_deref().unwrap_or(" ");
        match entry.item {
            NavItem::Dashboard => format!("{icon} {DASHBOARD_LABEL}"),
            NavItem::Entity(name) => format!("{icon} {name}"),
            NavItem::ThemeToggle => {
                let switch = match self.theme.mode {
                    ThemeMode::Dark => "[x]",
                    ThemeMode::Light => "[ ]",
                };
                format!("{switch} Dark Mode")
            }
        }
    }
}

impl StatefulWidget for Sidebar<'_> {
    type State = SidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(state.focused))
            .style(self.theme.panel_style)
            .title(" Menu ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [list_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let items: Vec<ListItem> = state
            .entries
            .iter()
            .map(|entry| {
                let style = if entry.item == state.active {
                    self.theme
                        .panel_style
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    self.theme.panel_style
                };
                ListItem::new(Line::from(Span::styled(self.label(entry), style)))
            })
            .collect();

        let highlight = if state.focused {
            self.theme.selection_style
        } else {
            self.theme.panel_style
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("▌");
        StatefulWidget::render(list, list_area, buf, &mut state.list_state);

        Paragraph::new(Span::styled("C-t theme", self.theme.dimmed_style)).render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar() -> SidebarState {
        SidebarState::new(["Clients", "Branches"], |name| {
            (name == "Clients").then_some("C")
        })
    }

    #[test]
    fn test_entry_order() {
        let mut state = sidebar();
        assert_eq!(state.selected(), NavItem::Dashboard);
        state.select_next();
        assert_eq!(state.selected(), NavItem::Entity("Clients"));
        state.select_last();
        assert_eq!(state.selected(), NavItem::ThemeToggle);
        state.select_next();
        assert_eq!(state.selected(), NavItem::ThemeToggle);
        state.select_first();
        state.select_previous();
        assert_eq!(state.selected(), NavItem::Dashboard);
    }

    #[test]
    fn test_render_icons_and_switch() {
        let mut state = sidebar();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);

        Sidebar::new(&theme).render(area, &mut buf, &mut state);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("C Clients"));
        assert!(text.contains("  Branches"));
        assert!(text.contains("[x] Dark Mode"));
    }
}
