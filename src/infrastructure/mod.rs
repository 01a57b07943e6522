//! Infrastructure layer with external service adapters.

/// Sidebar icon loading.
pub mod assets;
/// Application configuration.
pub mod config;
/// Database adapters.
pub mod database;

pub use assets::IconSet;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use database::SqliteDatabase;
