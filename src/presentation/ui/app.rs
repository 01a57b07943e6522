//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    widgets::Block,
};
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::use_cases::{DashboardUseCase, EntityUseCase};
use crate::application::{DatabaseGateway, NotificationManager, WriteOutcome};
use crate::domain::entities::EntityConfig;
use crate::domain::keybinding::{
    Action, Keybind, confirm_bindings, dialog_bindings, global_bindings, list_bindings,
    record_bindings, resolve, search_bindings,
};
use crate::infrastructure::IconSet;
use crate::presentation::events::{EventResult, is_key_press, is_quit_event};
use crate::presentation::theme::Theme;
use crate::presentation::ui::dashboard_screen::{DashboardScreen, DashboardView};
use crate::presentation::ui::dialog::{ConfirmDialog, DialogQueue, ErrorDialog};
use crate::presentation::ui::entity_screen::{
    DELETE_PROMPT, EntityCommand, EntityScreen, EntityScreenState, RECORD_DELETED,
};
use crate::presentation::ui::notification_popup::NotificationPopup;
use crate::presentation::widgets::{
    FocusContext, FooterBar, HeaderBar, NavItem, Sidebar, SidebarState,
};

const TICK_RATE: Duration = Duration::from_millis(200);
const SIDEBAR_WIDTH: u16 = 24;

enum CurrentScreen {
    Dashboard(DashboardScreen),
    Entity(Box<EntityScreenState>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellFocus {
    Sidebar,
    Content,
}

/// The application shell: sidebar, current screen, overlays and the event loop.
pub struct App {
    gateway: Arc<DatabaseGateway>,
    dialogs: Arc<DialogQueue>,
    catalog: Vec<EntityConfig>,
    theme: Theme,
    notifications: NotificationManager,
    sidebar: SidebarState,
    screen: CurrentScreen,
    focus: ShellFocus,
    confirming_delete: bool,
    running: bool,
}

impl App {
    /// `dialogs` must be the alert sink the gateway reports to.
    #[must_use]
    pub fn new(
        gateway: Arc<DatabaseGateway>,
        dialogs: Arc<DialogQueue>,
        theme: Theme,
        toast_duration: Duration,
        icons: &IconSet,
    ) -> Self {
        let catalog = EntityConfig::catalog();
        let sidebar = SidebarState::new(catalog.iter().map(EntityConfig::display_name), |name| {
            icons.get(name)
        });

        Self {
            gateway,
            dialogs,
            catalog,
            theme,
            notifications: NotificationManager::new(toast_duration),
            sidebar,
            screen: CurrentScreen::Dashboard(DashboardScreen::default()),
            focus: ShellFocus::Sidebar,
            confirming_delete: false,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing or reading terminal events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.navigate(NavItem::Dashboard).await;
        self.run_event_loop(terminal).await?;
        self.gateway.shutdown().await;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                _ = tick.tick() => {
                    if self.notifications.tick() {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                event = terminal_events.next() => {
                    match event {
                        Some(Ok(event)) => {
                            if self.handle_terminal_event(event).await == EventResult::Exit {
                                self.running = false;
                            }
                            terminal.draw(|frame| self.render(frame))?;
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => self.running = false,
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if is_key_press(&key) => self.handle_key(key).await,
            _ => EventResult::Continue,
        }
    }

    fn is_editing_text(&self) -> bool {
        self.focus == ShellFocus::Content
            && matches!(&self.screen, CurrentScreen::Entity(s) if s.is_editing_text())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if !self.dialogs.is_empty() {
            if resolve(&dialog_bindings(), &key).is_some() {
                self.dialogs.dismiss();
            }
            return EventResult::Consumed;
        }

        if self.confirming_delete {
            return self.handle_confirm_key(&key).await;
        }

        if is_quit_event(&key, self.is_editing_text()) {
            return EventResult::Exit;
        }

        match resolve(&global_bindings(), &key) {
            Some(Action::FocusNext) => {
                self.cycle_focus(true);
                return EventResult::Consumed;
            }
            Some(Action::FocusPrevious) => {
                self.cycle_focus(false);
                return EventResult::Consumed;
            }
            Some(Action::ToggleTheme) => {
                self.toggle_theme();
                return EventResult::Consumed;
            }
            _ => {}
        }

        match self.focus {
            ShellFocus::Sidebar => self.handle_sidebar_key(&key).await,
            ShellFocus::Content => self.handle_content_key(&key).await,
        }
    }

    async fn handle_confirm_key(&mut self, key: &KeyEvent) -> EventResult {
        let confirmed = match resolve(&confirm_bindings(), key) {
            Some(Action::Confirm) => true,
            Some(Action::Cancel) => false,
            _ => return EventResult::Consumed,
        };
        self.confirming_delete = false;

        if let CurrentScreen::Entity(screen) = &mut self.screen
            && screen.confirm_delete(confirmed).await == WriteOutcome::Written
        {
            self.notifications.success(RECORD_DELETED);
        }
        EventResult::Consumed
    }

    async fn handle_sidebar_key(&mut self, key: &KeyEvent) -> EventResult {
        match resolve(&list_bindings(), key) {
            Some(Action::NavigateDown) => self.sidebar.select_next(),
            Some(Action::NavigateUp) => self.sidebar.select_previous(),
            Some(Action::SelectFirst) => self.sidebar.select_first(),
            Some(Action::SelectLast) => self.sidebar.select_last(),
            Some(Action::Select) => match self.sidebar.selected() {
                NavItem::ThemeToggle => self.toggle_theme(),
                item => self.navigate(item).await,
            },
            _ => return EventResult::Continue,
        }
        EventResult::Consumed
    }

    async fn handle_content_key(&mut self, key: &KeyEvent) -> EventResult {
        let CurrentScreen::Entity(screen) = &mut self.screen else {
            return EventResult::Continue;
        };
        match screen.handle_key(key).await {
            EntityCommand::Toast(message) => {
                self.notifications.success(message);
                EventResult::Consumed
            }
            EntityCommand::ConfirmDelete => {
                self.confirming_delete = true;
                EventResult::Consumed
            }
            EntityCommand::Consumed => EventResult::Consumed,
            EntityCommand::Ignored => EventResult::Continue,
        }
    }

    /// Sidebar, then the entity screen's own stops, then back to the sidebar.
    fn cycle_focus(&mut self, forward: bool) {
        let CurrentScreen::Entity(screen) = &mut self.screen else {
            return;
        };
        let stays_in_content = if forward {
            screen.focus_next()
        } else {
            screen.focus_previous()
        };
        self.focus = if stays_in_content {
            ShellFocus::Content
        } else {
            screen.blur();
            ShellFocus::Sidebar
        };
        self.sidebar.set_focused(self.focus == ShellFocus::Sidebar);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(mode = ?self.theme.mode, "Theme toggled");
    }

    /// Replaces the current screen; the old one's state is dropped.
    async fn navigate(&mut self, item: NavItem) {
        let screen = match item {
            NavItem::Dashboard => CurrentScreen::Dashboard(
                DashboardScreen::load(&DashboardUseCase::new(self.gateway.clone())).await,
            ),
            NavItem::Entity(name) => {
                let Some(config) = self.catalog.iter().find(|c| c.display_name() == name) else {
                    return;
                };
                let use_case = EntityUseCase::new(config.clone(), self.gateway.clone());
                CurrentScreen::Entity(Box::new(EntityScreenState::open(use_case).await))
            }
            NavItem::ThemeToggle => return,
        };
        info!(?item, "Navigated");
        self.screen = screen;
        self.sidebar.set_active(item);
        self.focus = ShellFocus::Sidebar;
        self.sidebar.set_focused(true);
        self.confirming_delete = false;
    }

    fn focus_context(&self) -> FocusContext {
        if !self.dialogs.is_empty() || self.confirming_delete {
            return FocusContext::Dialog;
        }
        match (&self.screen, self.focus) {
            (CurrentScreen::Entity(screen), ShellFocus::Content) => {
                screen.focus_context().unwrap_or_default()
            }
            _ => FocusContext::Sidebar,
        }
    }

    fn footer_bindings(&self) -> Vec<Keybind> {
        let context = self.focus_context();
        let mut bindings = match context {
            FocusContext::Dialog if self.confirming_delete && self.dialogs.is_empty() => {
                return confirm_bindings();
            }
            FocusContext::Dialog => return dialog_bindings(),
            _ => global_bindings(),
        };
        let record_actions = matches!(self.screen, CurrentScreen::Entity(_))
            && !matches!(context, FocusContext::Sidebar);
        match context {
            FocusContext::Sidebar => bindings.extend(list_bindings()),
            FocusContext::Search => bindings.extend(search_bindings()),
            FocusContext::Grid => bindings.extend(list_bindings()),
            FocusContext::Form | FocusContext::Dialog => {}
        }
        if record_actions {
            bindings.extend(record_bindings());
        }
        bindings
    }

    fn title(&self) -> &'static str {
        match &self.screen {
            CurrentScreen::Dashboard(_) => "Dashboard",
            CurrentScreen::Entity(screen) => screen.title(),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.theme.base_style), area);

        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        let [sidebar_area, content_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body_area);

        frame.render_widget(
            HeaderBar::new(crate::NAME, crate::VERSION, &self.theme)
                .title(self.title())
                .connection_status(self.gateway.status()),
            header_area,
        );

        frame.render_stateful_widget(Sidebar::new(&self.theme), sidebar_area, &mut self.sidebar);

        match &mut self.screen {
            CurrentScreen::Dashboard(screen) => {
                frame.render_widget(DashboardView::new(screen, &self.theme), content_area);
            }
            CurrentScreen::Entity(screen) => {
                frame.render_stateful_widget(EntityScreen::new(&self.theme), content_area, screen);
            }
        }

        let bindings = self.footer_bindings();
        frame.render_widget(
            FooterBar::new(&bindings, &self.theme)
                .focus_context(self.focus_context())
                .right_info(Some(self.title())),
            footer_area,
        );

        if let Some(notification) = self.notifications.current() {
            frame.render_widget(NotificationPopup::new(notification, &self.theme), area);
        }
        if self.confirming_delete {
            frame.render_widget(ConfirmDialog::new(DELETE_PROMPT, &self.theme), area);
        }
        if let Some(error) = self.dialogs.front() {
            frame.render_widget(ErrorDialog::new(&error, &self.theme), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::DATABASE_ERROR_TITLE;
    use crate::domain::entities::Record;
    use crate::domain::ports::mocks::MockDatabase;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn app(db: &Arc<MockDatabase>) -> App {
        let dialogs = Arc::new(DialogQueue::new());
        let gateway = Arc::new(DatabaseGateway::new(db.clone(), dialogs.clone()));
        App::new(
            gateway,
            dialogs,
            Theme::default(),
            Duration::from_secs(2),
            &IconSet::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn open_services(app: &mut App) {
        app.navigate(NavItem::Entity("Services")).await;
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))).await, EventResult::Exit);
        assert_eq!(app.handle_key(ctrl('c')).await, EventResult::Exit);
    }

    #[tokio::test]
    async fn test_q_types_into_form() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        open_services(&mut app).await;

        app.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(app.focus, ShellFocus::Content);
        assert_eq!(
            app.handle_key(key(KeyCode::Char('q'))).await,
            EventResult::Consumed
        );
        assert_eq!(app.handle_key(ctrl('c')).await, EventResult::Exit);
    }

    #[tokio::test]
    async fn test_sidebar_navigation_opens_screen() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);

        app.handle_key(key(KeyCode::Down)).await;
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.title(), "Clients");
        assert_eq!(app.sidebar.active(), NavItem::Entity("Clients"));
        assert_eq!(db.statements()[0].sql(), "SELECT * FROM Client");
    }

    #[tokio::test]
    async fn test_dashboard_ignores_tab() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        app.navigate(NavItem::Dashboard).await;

        app.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(app.focus, ShellFocus::Sidebar);
        assert_eq!(db.statements().len(), 4);
    }

    #[tokio::test]
    async fn test_focus_cycle_returns_to_sidebar() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        open_services(&mut app).await;

        let mut contexts = Vec::new();
        for _ in 0..6 {
            app.handle_key(key(KeyCode::Tab)).await;
            contexts.push(app.focus_context());
        }

        assert_eq!(
            contexts,
            [
                FocusContext::Form,
                FocusContext::Form,
                FocusContext::Form,
                FocusContext::Search,
                FocusContext::Grid,
                FocusContext::Sidebar,
            ]
        );

        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
            .await;
        assert_eq!(app.focus_context(), FocusContext::Grid);
    }

    #[tokio::test]
    async fn test_record_hints_only_inside_entity_screen() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        open_services(&mut app).await;
        let has_add = |app: &App| {
            app.footer_bindings()
                .iter()
                .any(|b| b.action == Action::AddRecord)
        };

        assert_eq!(app.focus_context(), FocusContext::Sidebar);
        assert!(!has_add(&app));

        app.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(app.focus_context(), FocusContext::Form);
        assert!(has_add(&app));
    }

    #[tokio::test]
    async fn test_statement_error_shows_dialog_until_dismissed() {
        let db = Arc::new(MockDatabase::new());
        db.set_fail_statements(true);
        let mut app = app(&db);
        open_services(&mut app).await;

        assert_eq!(app.dialogs.len(), 1);
        assert_eq!(app.focus_context(), FocusContext::Dialog);
        assert!(draw(&mut app).contains(DATABASE_ERROR_TITLE));

        assert_eq!(
            app.handle_key(key(KeyCode::Char('q'))).await,
            EventResult::Consumed
        );
        app.handle_key(key(KeyCode::Enter)).await;
        assert!(app.dialogs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_confirmation_flow() {
        let db = Arc::new(MockDatabase::with_rows(vec![
            Record::new()
                .with("ServiceID", 1_i64)
                .with("SName", "OilChange")
                .with("Cost", 49.99),
        ]));
        let mut app = app(&db);
        open_services(&mut app).await;
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Tab)).await;
        }
        app.handle_key(key(KeyCode::Down)).await;

        app.handle_key(ctrl('d')).await;
        assert!(app.confirming_delete);
        assert!(draw(&mut app).contains(DELETE_PROMPT));

        app.handle_key(key(KeyCode::Char('n'))).await;
        assert!(!app.confirming_delete);
        assert!(db.writes().is_empty());

        app.handle_key(ctrl('d')).await;
        app.handle_key(key(KeyCode::Char('y'))).await;
        assert_eq!(db.writes().len(), 1);
        assert_eq!(
            app.notifications.current().map(|n| n.message.as_str()),
            Some(RECORD_DELETED)
        );
    }

    #[tokio::test]
    async fn test_theme_toggle() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        let initial = app.theme.mode;

        app.handle_key(ctrl('t')).await;
        assert_ne!(app.theme.mode, initial);

        app.handle_key(key(KeyCode::End)).await;
        app.handle_key(key(KeyCode::Enter)).await;
        assert_eq!(app.theme.mode, initial);
    }

    #[tokio::test]
    async fn test_render_shell() {
        let db = Arc::new(MockDatabase::new());
        let mut app = app(&db);
        app.gateway.open().await.unwrap();
        app.navigate(NavItem::Dashboard).await;

        let screen = draw(&mut app);
        assert!(screen.contains("ROADREV"));
        assert!(screen.contains("DB ONLINE"));
        assert!(screen.contains("Services"));
        assert!(screen.contains("Total Clients"));
    }
}
