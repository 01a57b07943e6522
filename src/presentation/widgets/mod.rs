mod footer_bar;
mod header_bar;
mod input;
mod record_grid;
mod sidebar;

pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use record_grid::{RecordGrid, RecordGridState, RecordGridStyle, SortDirection, SortOrder};
pub use sidebar::{DASHBOARD_LABEL, NavItem, Sidebar, SidebarState};
