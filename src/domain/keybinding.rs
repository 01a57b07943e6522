use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

/// Something a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Switch between dark and light mode.
    ToggleTheme,

    // Navigation / Focus
    /// Move focus to the next region.
    FocusNext,
    /// Move focus to the previous region.
    FocusPrevious,
    /// Move the selection up.
    NavigateUp,
    /// Move the selection down.
    NavigateDown,
    /// Jump to the first entry.
    SelectFirst,
    /// Jump to the last entry.
    SelectLast,
    /// Make the previous grid column active.
    PreviousColumn,
    /// Make the next grid column active.
    NextColumn,
    /// Open the selected entry.
    Select,

    // Record Actions
    /// Insert the form as a new record.
    AddRecord,
    /// Write the form over the selected record.
    UpdateRecord,
    /// Delete the selected record after confirmation.
    DeleteRecord,
    /// Empty the form and drop the selection.
    ClearForm,
    /// Run the search box query.
    Search,
    /// Cycle the active column's sort order.
    CycleSort,

    // Dialogs
    /// Accept the dialog.
    Confirm,
    /// Dismiss or decline the dialog.
    Cancel,
}

/// A key bound to an action, with its footer hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    /// Key that triggers the action.
    pub key: KeyEvent,
    /// Triggered action.
    pub action: Action,
    /// Footer label.
    pub label: Cow<'static, str>,
    /// Whether the footer shows this binding.
    pub visible_in_bar: bool,
}

impl Keybind {
    /// Creates a binding shown in the footer.
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    /// Hides the binding from the footer.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Shift is ignored: terminals disagree on reporting it for `BackTab`
    /// and it is already folded into the character for letters.
    #[must_use]
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let strip = |m: KeyModifiers| m.difference(KeyModifiers::SHIFT);
        self.key.code == key.code && strip(self.key.modifiers) == strip(key.modifiers)
    }
}

const fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

const fn ctrl(c: char) -> KeyEvent {
    key(KeyCode::Char(c), KeyModifiers::CONTROL)
}

const fn plain(code: KeyCode) -> KeyEvent {
    key(code, KeyModifiers::NONE)
}

/// Bindings active everywhere except inside dialogs.
#[must_use]
pub fn global_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(ctrl('c'), Action::Quit, "Quit"),
        Keybind::new(plain(KeyCode::Tab), Action::FocusNext, "Focus"),
        Keybind::new(
            key(KeyCode::BackTab, KeyModifiers::SHIFT),
            Action::FocusPrevious,
            "Back",
        )
        .hidden(),
        Keybind::new(ctrl('t'), Action::ToggleTheme, "Theme"),
    ]
}

/// Record actions on an entity screen.
#[must_use]
pub fn record_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(ctrl('a'), Action::AddRecord, "Add"),
        Keybind::new(ctrl('u'), Action::UpdateRecord, "Update"),
        Keybind::new(ctrl('d'), Action::DeleteRecord, "Delete"),
        Keybind::new(ctrl('l'), Action::ClearForm, "Clear"),
    ]
}

/// List navigation (sidebar and grid).
#[must_use]
pub fn list_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(plain(KeyCode::Up), Action::NavigateUp, "Up").hidden(),
        Keybind::new(plain(KeyCode::Down), Action::NavigateDown, "Down").hidden(),
        Keybind::new(plain(KeyCode::Char('k')), Action::NavigateUp, "Up").hidden(),
        Keybind::new(plain(KeyCode::Char('j')), Action::NavigateDown, "Down").hidden(),
        Keybind::new(plain(KeyCode::Home), Action::SelectFirst, "First").hidden(),
        Keybind::new(plain(KeyCode::End), Action::SelectLast, "Last").hidden(),
        Keybind::new(plain(KeyCode::Left), Action::PreviousColumn, "Column").hidden(),
        Keybind::new(plain(KeyCode::Right), Action::NextColumn, "Column").hidden(),
        Keybind::new(plain(KeyCode::Enter), Action::Select, "Open"),
        Keybind::new(plain(KeyCode::Char('s')), Action::CycleSort, "Sort"),
        Keybind::new(plain(KeyCode::Char('q')), Action::Quit, "Quit").hidden(),
    ]
}

/// Running a search from the search box.
#[must_use]
pub fn search_bindings() -> Vec<Keybind> {
    vec![Keybind::new(plain(KeyCode::Enter), Action::Search, "Search")]
}

/// Error dialog dismissal.
#[must_use]
pub fn dialog_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(plain(KeyCode::Enter), Action::Confirm, "OK"),
        Keybind::new(plain(KeyCode::Esc), Action::Cancel, "Close").hidden(),
    ]
}

/// Yes/no confirmation dialog.
#[must_use]
pub fn confirm_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(plain(KeyCode::Char('y')), Action::Confirm, "Yes"),
        Keybind::new(plain(KeyCode::Char('n')), Action::Cancel, "No"),
        Keybind::new(plain(KeyCode::Esc), Action::Cancel, "Cancel").hidden(),
    ]
}

/// Resolves `key` against `bindings`, first match wins.
#[must_use]
pub fn resolve(bindings: &[Keybind], key: &KeyEvent) -> Option<Action> {
    bindings.iter().find(|b| b.matches(key)).map(|b| b.action)
}
