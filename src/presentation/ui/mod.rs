//! UI screens.

mod app;
mod dashboard_screen;
pub mod dialog;
mod entity_screen;
mod notification_popup;
pub mod utils;

pub use app::App;
pub use dashboard_screen::{DashboardScreen, DashboardView};
pub use dialog::{DialogQueue, ErrorMessage, show_startup_error};
pub use entity_screen::{EntityCommand, EntityScreen, EntityScreenState};
pub use notification_popup::NotificationPopup;
