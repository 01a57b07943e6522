//! Database driver port definition.

use async_trait::async_trait;

use crate::domain::entities::{Record, Statement};
use crate::domain::errors::DatabaseError;

/// Port for a single relational database connection.
#[async_trait]
pub trait DatabasePort: Send + Sync {
    /// Opens (or reopens) the connection, replacing any previous one.
    async fn connect(&self) -> Result<(), DatabaseError>;

    /// Checks whether the connection is open and alive.
    async fn is_connected(&self) -> bool;

    /// Runs a row-returning statement.
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError>;

    /// Runs a statement that returns no rows, yielding the affected row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError>;

    /// Closes the connection if open.
    async fn close(&self);
}
