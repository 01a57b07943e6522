//! Database error types.

use thiserror::Error;

/// Database error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DatabaseError {
    #[error("could not connect to database: {message}")]
    Connection { message: String },

    #[error("database connection is closed")]
    NotConnected,

    #[error("statement failed: {message}")]
    Statement { message: String },

    #[error("unsupported column type {type_name} in column {column}")]
    UnsupportedType { column: String, type_name: String },
}

impl DatabaseError {
    /// Creates connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates statement error.
    #[must_use]
    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }

    /// Returns whether the error concerns the connection rather than the
    /// statement itself.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::NotConnected)
    }
}
