//! Form, search box and record grid for one entity.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, StatefulWidget, Widget},
};
use tracing::debug;

use crate::application::WriteOutcome;
use crate::application::use_cases::EntityUseCase;
use crate::domain::keybinding::{
    Action, list_bindings, record_bindings, resolve, search_bindings,
};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{FocusContext, RecordGrid, RecordGridState, TextInput};

/// Toast after a successful insert.
pub const RECORD_ADDED: &str = "Record Added";
/// Toast after a successful update.
pub const RECORD_UPDATED: &str = "Record Updated";
/// Toast after a successful delete.
pub const RECORD_DELETED: &str = "Record Deleted";
/// Question asked before deleting.
pub const DELETE_PROMPT: &str = "Delete this record?";

const FORM_COLUMNS: usize = 3;
const INPUT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityFocus {
    /// Form input by index.
    Form(usize),
    Search,
    Grid,
}

/// What the shell should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityCommand {
    /// Key not handled here.
    Ignored,
    /// Key handled, nothing else to do.
    Consumed,
    /// A write succeeded; show a toast.
    Toast(&'static str),
    /// Ask the user to confirm the pending delete.
    ConfirmDelete,
}

/// State of one entity screen: form inputs, search box, grid and focus.
pub struct EntityScreenState {
    use_case: EntityUseCase,
    inputs: Vec<TextInput>,
    search: TextInput,
    grid: RecordGridState,
    headers: Vec<String>,
    focus: Option<EntityFocus>,
    pending_delete: Option<String>,
}

impl EntityScreenState {
    /// Builds an empty screen for the use case's entity.
    #[must_use]
    pub fn new(use_case: EntityUseCase) -> Self {
        let config = use_case.config();
        let inputs = config
            .fields()
            .iter()
            .map(|field| {
                let input = TextInput::new(field.label());
                if field.is_editable() {
                    input
                } else {
                    input.auto_filled()
                }
            })
            .collect();
        let headers = config.fields().iter().map(|f| f.label()).collect();
        let grid = RecordGridState::new(config.fields().len());

        Self {
            use_case,
            inputs,
            search: TextInput::new("Search").placeholder("Type and press Enter"),
            grid,
            headers,
            focus: None,
            pending_delete: None,
        }
    }

    /// Builds the screen and loads its rows.
    pub async fn open(use_case: EntityUseCase) -> Self {
        let mut screen = Self::new(use_case);
        screen.load().await;
        screen
    }

    /// Entity display name.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.use_case.config().display_name()
    }

    /// The record grid.
    #[must_use]
    pub const fn grid(&self) -> &RecordGridState {
        &self.grid
    }

    /// Current form values, in field order.
    #[must_use]
    pub fn form_values(&self) -> Vec<String> {
        self.inputs.iter().map(|i| i.value().to_string()).collect()
    }

    /// Reloads every row. On failure the grid keeps its contents.
    pub async fn load(&mut self) -> bool {
        self.apply_rows(self.use_case.load().await)
    }

    /// Filters rows by the search box contents.
    pub async fn search(&mut self) -> bool {
        let term = self.search.value().to_string();
        self.apply_rows(self.use_case.search(&term).await)
    }

    fn apply_rows(&mut self, rows: Option<Vec<Vec<String>>>) -> bool {
        let Some(rows) = rows else {
            return false;
        };
        debug!(entity = self.title(), rows = rows.len(), "Grid repopulated");
        self.grid.set_rows(rows);
        true
    }

    fn populate_form(&mut self) {
        let Some(row) = self.grid.selected_row() else {
            return;
        };
        for (input, value) in self.inputs.iter_mut().zip(row) {
            input.set_value(value.as_str());
        }
    }

    /// Empties every input and drops the grid selection.
    pub fn clear_form(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.grid.clear_selection();
    }

    /// Inserts the form. On success the grid is reloaded and the form cleared.
    pub async fn add(&mut self) -> WriteOutcome {
        let outcome = self.use_case.add(self.form_values()).await;
        if outcome.is_written() {
            self.load().await;
            self.clear_form();
        }
        outcome
    }

    /// Requires a selected row.
    pub async fn update(&mut self) -> WriteOutcome {
        if self.grid.selected_row().is_none() {
            return WriteOutcome::Skipped;
        }
        let outcome = self.use_case.update(self.form_values()).await;
        if outcome.is_written() {
            self.load().await;
        }
        outcome
    }

    /// Remembers the selected row's key for [`Self::confirm_delete`]. Returns
    /// `false` when no row is selected.
    pub fn request_delete(&mut self) -> bool {
        let key_index = self.use_case.config().primary_key_index();
        self.pending_delete = self
            .grid
            .selected_row()
            .and_then(|row| row.get(key_index).cloned());
        self.pending_delete.is_some()
    }

    /// Whether a delete is waiting for confirmation.
    #[must_use]
    pub const fn has_pending_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Runs or drops the pending delete.
    pub async fn confirm_delete(&mut self, confirmed: bool) -> WriteOutcome {
        let Some(key) = self.pending_delete.take() else {
            return WriteOutcome::Skipped;
        };
        if !confirmed {
            debug!(entity = self.title(), "Delete declined");
            return WriteOutcome::Skipped;
        }
        let outcome = self.use_case.delete(key).await;
        if outcome.is_written() {
            self.load().await;
            self.clear_form();
        }
        outcome
    }

    fn editable_inputs(&self) -> impl Iterator<Item = usize> + '_ {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| !input.is_disabled())
            .map(|(i, _)| i)
    }

    /// Focus order: editable inputs, search box, grid.
    fn focus_stops(&self) -> Vec<EntityFocus> {
        self.editable_inputs()
            .map(EntityFocus::Form)
            .chain([EntityFocus::Search, EntityFocus::Grid])
            .collect()
    }

    fn set_focus(&mut self, focus: Option<EntityFocus>) {
        self.focus = focus;
        for (i, input) in self.inputs.iter_mut().enumerate() {
            input.set_focused(focus == Some(EntityFocus::Form(i)));
        }
        self.search.set_focused(focus == Some(EntityFocus::Search));
        self.grid.set_focused(focus == Some(EntityFocus::Grid));
    }

    /// Moves focus forward. Returns `false` when focus leaves the screen.
    pub fn focus_next(&mut self) -> bool {
        let stops = self.focus_stops();
        let next = match self.focus {
            None => stops.first().copied(),
            Some(current) => stops
                .iter()
                .position(|&s| s == current)
                .and_then(|p| stops.get(p + 1).copied()),
        };
        self.set_focus(next);
        next.is_some()
    }

    /// Moves focus backward. Returns `false` when focus leaves the screen.
    pub fn focus_previous(&mut self) -> bool {
        let stops = self.focus_stops();
        let previous = match self.focus {
            None => stops.last().copied(),
            Some(current) => stops
                .iter()
                .position(|&s| s == current)
                .and_then(|p| p.checked_sub(1))
                .map(|p| stops[p]),
        };
        self.set_focus(previous);
        previous.is_some()
    }

    /// Drops focus from every region.
    pub fn blur(&mut self) {
        self.set_focus(None);
    }

    /// Footer context of the focused region, `None` when nothing is focused.
    #[must_use]
    pub const fn focus_context(&self) -> Option<FocusContext> {
        match self.focus {
            Some(EntityFocus::Form(_)) => Some(FocusContext::Form),
            Some(EntityFocus::Search) => Some(FocusContext::Search),
            Some(EntityFocus::Grid) => Some(FocusContext::Grid),
            None => None,
        }
    }

    /// Whether plain keys go to a text input.
    #[must_use]
    pub const fn is_editing_text(&self) -> bool {
        matches!(
            self.focus,
            Some(EntityFocus::Form(_) | EntityFocus::Search)
        )
    }

    /// Routes a key to record actions, then to the focused region.
    pub async fn handle_key(&mut self, key: &KeyEvent) -> EntityCommand {
        if let Some(action) = resolve(&record_bindings(), key) {
            return self.run_record_action(action).await;
        }

        match self.focus {
            Some(EntityFocus::Form(index)) => self.handle_form_key(index, key),
            Some(EntityFocus::Search) => {
                if resolve(&search_bindings(), key) == Some(Action::Search) {
                    self.search().await;
                    EntityCommand::Consumed
                } else if self.search.handle_key(key) {
                    EntityCommand::Consumed
                } else {
                    EntityCommand::Ignored
                }
            }
            Some(EntityFocus::Grid) => self.handle_grid_key(key),
            None => EntityCommand::Ignored,
        }
    }

    async fn run_record_action(&mut self, action: Action) -> EntityCommand {
        let (outcome, message) = match action {
            Action::AddRecord => (self.add().await, RECORD_ADDED),
            Action::UpdateRecord => (self.update().await, RECORD_UPDATED),
            Action::DeleteRecord => {
                return if self.request_delete() {
                    EntityCommand::ConfirmDelete
                } else {
                    EntityCommand::Consumed
                };
            }
            Action::ClearForm => {
                self.clear_form();
                return EntityCommand::Consumed;
            }
            _ => return EntityCommand::Ignored,
        };

        if outcome.is_written() {
            EntityCommand::Toast(message)
        } else {
            EntityCommand::Consumed
        }
    }

    fn handle_form_key(&mut self, index: usize, key: &KeyEvent) -> EntityCommand {
        let editable: Vec<usize> = self.editable_inputs().collect();
        let position = editable.iter().position(|&i| i == index);
        let target = match (key.code, position) {
            (KeyCode::Down | KeyCode::Enter, Some(p)) => editable.get(p + 1).copied(),
            (KeyCode::Up, Some(p)) => p.checked_sub(1).map(|p| editable[p]),
            _ => {
                return match self.inputs.get_mut(index).map(|input| input.handle_key(key)) {
                    Some(true) => EntityCommand::Consumed,
                    _ => EntityCommand::Ignored,
                };
            }
        };
        if let Some(target) = target {
            self.set_focus(Some(EntityFocus::Form(target)));
        }
        EntityCommand::Consumed
    }

    fn handle_grid_key(&mut self, key: &KeyEvent) -> EntityCommand {
        let Some(action) = resolve(&list_bindings(), key) else {
            return EntityCommand::Ignored;
        };
        let changed = match action {
            Action::NavigateDown => self.grid.select_next(),
            Action::NavigateUp => self.grid.select_previous(),
            Action::SelectFirst => self.grid.select_first(),
            Action::SelectLast => self.grid.select_last(),
            Action::Select => true,
            Action::NextColumn => {
                self.grid.next_column();
                false
            }
            Action::PreviousColumn => {
                self.grid.previous_column();
                false
            }
            Action::CycleSort => {
                self.grid.cycle_sort();
                false
            }
            _ => return EntityCommand::Ignored,
        };
        if changed {
            self.populate_form();
        }
        EntityCommand::Consumed
    }
}

/// Draws an [`EntityScreenState`]: form, search box, then grid.
pub struct EntityScreen<'a> {
    theme: &'a Theme,
}

impl<'a> EntityScreen<'a> {
    /// Screen drawn with `theme`.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for EntityScreen<'_> {
    type State = EntityScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(format!(" {} ", state.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        let form_rows = u16::try_from(state.inputs.len().div_ceil(FORM_COLUMNS)).unwrap_or(1);
        let [form_area, search_area, grid_area] = Layout::vertical([
            Constraint::Length(form_rows * INPUT_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(3),
        ])
        .areas(inner);

        let rows = Layout::vertical(vec![Constraint::Length(INPUT_HEIGHT); usize::from(form_rows)])
            .split(form_area);
        for (chunk, row_area) in state.inputs.chunks(FORM_COLUMNS).zip(rows.iter()) {
            let cells = Layout::horizontal(vec![Constraint::Fill(1); FORM_COLUMNS]).split(*row_area);
            for (input, cell) in chunk.iter().zip(cells.iter()) {
                input.render_themed(*cell, buf, self.theme);
            }
        }

        state.search.render_themed(search_area, buf, self.theme);

        let count = format!(" {} rows ", state.grid.len());
        RecordGrid::new(&state.headers, self.theme)
            .title(&count)
            .render(grid_area, buf, &mut state.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::DatabaseGateway;
    use crate::domain::entities::{EntityConfig, Record};
    use crate::domain::ports::mocks::{MockDatabase, RecordingAlerts};
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn service_rows() -> Vec<Record> {
        vec![
            Record::new()
                .with("ServiceID", 1_i64)
                .with("SName", "OilChange")
                .with("Cost", 49.99),
            Record::new()
                .with("ServiceID", 2_i64)
                .with("SName", "Wash")
                .with("Cost", 10.0),
        ]
    }

    async fn screen(
        display_name: &str,
        db: &Arc<MockDatabase>,
    ) -> (EntityScreenState, Arc<RecordingAlerts>) {
        let alerts = Arc::new(RecordingAlerts::new());
        let gateway = Arc::new(DatabaseGateway::new(db.clone(), alerts.clone()));
        let config = EntityConfig::find(display_name).unwrap();
        let screen = EntityScreenState::open(EntityUseCase::new(config, gateway)).await;
        (screen, alerts)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(screen: &mut EntityScreenState, text: &str) {
        for c in text.chars() {
            let index = match screen.focus {
                Some(EntityFocus::Form(i)) => i,
                _ => panic!("form not focused"),
            };
            screen.inputs[index].handle_key(&key(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_open_loads_rows() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (screen, _) = screen("Services", &db).await;

        assert_eq!(screen.grid().len(), 2);
        assert_eq!(db.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_grid_and_alerts_once() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, alerts) = screen("Services", &db).await;

        db.set_fail_statements(true);
        assert!(!screen.load().await);

        assert_eq!(screen.grid().len(), 2);
        assert_eq!(alerts.count(), 1);
    }

    #[tokio::test]
    async fn test_grid_selection_populates_form() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;
        screen.set_focus(Some(EntityFocus::Grid));

        screen.handle_key(&key(KeyCode::Down)).await;
        assert_eq!(screen.form_values(), ["1", "OilChange", "49.99"]);

        screen.handle_key(&key(KeyCode::Char('j'))).await;
        assert_eq!(screen.form_values(), ["2", "Wash", "10"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_need_selection() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;

        assert_eq!(screen.handle_key(&ctrl('u')).await, EntityCommand::Consumed);
        assert_eq!(screen.handle_key(&ctrl('d')).await, EntityCommand::Consumed);
        assert!(!screen.has_pending_delete());
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn test_add_flow() {
        let db = Arc::new(MockDatabase::new());
        let (mut screen, _) = screen("Services", &db).await;
        assert!(screen.focus_next());

        type_text(&mut screen, "1");
        screen.handle_key(&key(KeyCode::Down)).await;
        type_text(&mut screen, "OilChange");
        screen.handle_key(&key(KeyCode::Enter)).await;
        type_text(&mut screen, "49.99");

        let command = screen.handle_key(&ctrl('a')).await;

        assert_eq!(command, EntityCommand::Toast(RECORD_ADDED));
        let writes = db.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].params(), ["1", "OilChange", "49.99"]);
        assert!(screen.form_values().iter().all(String::is_empty));
        assert_eq!(db.statements().len(), 3);
    }

    #[tokio::test]
    async fn test_add_empty_form_is_silent() {
        let db = Arc::new(MockDatabase::new());
        let (mut screen, _) = screen("Services", &db).await;

        assert_eq!(screen.handle_key(&ctrl('a')).await, EntityCommand::Consumed);
        assert!(db.writes().is_empty());
    }

    #[tokio::test]
    async fn test_update_uses_form_key() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;
        screen.set_focus(Some(EntityFocus::Grid));
        screen.handle_key(&key(KeyCode::Down)).await;
        screen.inputs[1].set_value("Synthetic Oil");

        let command = screen.handle_key(&ctrl('u')).await;

        assert_eq!(command, EntityCommand::Toast(RECORD_UPDATED));
        let write = &db.writes()[0];
        assert_eq!(write.params(), ["1", "Synthetic Oil", "49.99", "1"]);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;
        screen.set_focus(Some(EntityFocus::Grid));
        screen.handle_key(&key(KeyCode::End)).await;

        assert_eq!(
            screen.handle_key(&ctrl('d')).await,
            EntityCommand::ConfirmDelete
        );
        assert_eq!(screen.confirm_delete(false).await, WriteOutcome::Skipped);
        assert!(db.writes().is_empty());

        screen.handle_key(&ctrl('d')).await;
        assert_eq!(screen.confirm_delete(true).await, WriteOutcome::Written);
        let writes = db.writes();
        assert_eq!(writes[0].sql(), "DELETE FROM Service WHERE ServiceID=?");
        assert_eq!(writes[0].params(), ["2"]);
        assert!(screen.form_values().iter().all(String::is_empty));
    }

    #[tokio::test]
    async fn test_search_box_runs_on_enter() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;
        screen.set_focus(Some(EntityFocus::Search));

        for c in "Oil".chars() {
            screen.handle_key(&key(KeyCode::Char(c))).await;
        }
        db.set_rows(vec![service_rows().remove(0)]);
        screen.handle_key(&key(KeyCode::Enter)).await;

        let statements = db.statements();
        assert!(statements[1].sql().contains("LIKE ?"));
        assert_eq!(screen.grid().len(), 1);
    }

    #[tokio::test]
    async fn test_form_keys_edit_focused_input() {
        let db = Arc::new(MockDatabase::new());
        let (mut screen, _) = screen("Services", &db).await;
        assert!(screen.focus_next());

        for c in "42".chars() {
            assert_eq!(
                screen.handle_key(&key(KeyCode::Char(c))).await,
                EntityCommand::Consumed
            );
        }
        assert_eq!(
            screen.handle_key(&key(KeyCode::F(5))).await,
            EntityCommand::Ignored
        );
        assert_eq!(screen.form_values()[0], "42");
    }

    #[tokio::test]
    async fn test_booking_focus_skips_auto_filled_inputs() {
        let db = Arc::new(MockDatabase::new());
        let (mut screen, _) = screen("Bookings", &db).await;

        let mut visited = Vec::new();
        while screen.focus_next() {
            visited.push(screen.focus.unwrap());
        }

        assert_eq!(
            visited,
            [
                EntityFocus::Form(0),
                EntityFocus::Form(3),
                EntityFocus::Form(4),
                EntityFocus::Search,
                EntityFocus::Grid,
            ]
        );
        assert!(screen.focus_previous());
        assert_eq!(screen.focus, Some(EntityFocus::Grid));
    }

    #[tokio::test]
    async fn test_render_labels_and_rows() {
        let db = Arc::new(MockDatabase::with_rows(service_rows()));
        let (mut screen, _) = screen("Services", &db).await;
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);

        EntityScreen::new(&Theme::default()).render(area, &mut buf, &mut screen);

        let text: String = buf.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains(" Services "));
        assert!(text.contains("OilChange"));
        assert!(text.contains("2 rows"));
    }
}
