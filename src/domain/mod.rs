//! Domain layer with entity configuration, records, statements and ports.

/// Connection status definitions.
pub mod connection;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Transient notifications.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use connection::ConnectionStatus;
pub use entities::{EntityConfig, Record, Statement};
pub use errors::DatabaseError;
pub use notification::{Notification, NotificationLevel};
pub use ports::{AlertPort, DatabasePort};
