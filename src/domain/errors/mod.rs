//! Domain error types.

mod database_error;

pub use database_error::DatabaseError;
