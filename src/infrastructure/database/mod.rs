//! Database adapters.

pub mod schema;
mod sqlite;

pub use sqlite::SqliteDatabase;
