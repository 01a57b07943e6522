pub mod database_gateway;
pub mod notification_manager;

pub use database_gateway::{DATABASE_ERROR_TITLE, DatabaseGateway, QueryOutcome};
pub use notification_manager::NotificationManager;
