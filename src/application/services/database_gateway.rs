//! The only component allowed to talk to the database.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Record, Statement, StatementKind};
use crate::domain::errors::DatabaseError;
use crate::domain::ports::{AlertPort, DatabasePort};
use crate::domain::ConnectionStatus;

/// Title of the dialog shown for failed statements.
pub const DATABASE_ERROR_TITLE: &str = "Database Error";

/// Result of one gateway call. Failures have already been reported.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Rows of a `SELECT`, in result order.
    Rows(Vec<Record>),
    /// A non-`SELECT` statement succeeded.
    Done,
    /// The statement was not run or failed.
    Failed,
}

impl QueryOutcome {
    /// Whether the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Rows, if this was a successful query.
    #[must_use]
    pub fn into_rows(self) -> Option<Vec<Record>> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::Done | Self::Failed => None,
        }
    }
}

/// Wraps the driver port with reconnect-once and error-dialog semantics.
pub struct DatabaseGateway {
    database: Arc<dyn DatabasePort>,
    alerts: Arc<dyn AlertPort>,
    status: RwLock<ConnectionStatus>,
}

impl DatabaseGateway {
    /// Creates a gateway; no connection is opened yet.
    #[must_use]
    pub fn new(database: Arc<dyn DatabasePort>, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            database,
            alerts,
            status: RwLock::new(ConnectionStatus::Disconnected),
        }
    }

    /// Opens the connection at startup.
    ///
    /// # Errors
    /// Returns the connection error; the caller decides how to surface it.
    pub async fn open(&self) -> Result<(), DatabaseError> {
        self.set_status(ConnectionStatus::Connecting);
        match self.database.connect().await {
            Ok(()) => {
                self.set_status(ConnectionStatus::Connected);
                info!("Database gateway ready");
                Ok(())
            }
            Err(e) => {
                self.set_status(ConnectionStatus::Error);
                error!(error = %e, "Database connection failed");
                Err(e)
            }
        }
    }

    /// Runs `statement`.
    ///
    /// Reconnects once first if the connection is gone; a failed reconnect
    /// yields [`QueryOutcome::Failed`] silently. Statement errors are reported
    /// to the alert sink exactly once and also yield `Failed`.
    pub async fn execute(&self, statement: &Statement) -> QueryOutcome {
        if !self.ensure_connected().await {
            return QueryOutcome::Failed;
        }

        debug!(sql = %statement, params = statement.params().len(), "Executing statement");

        let result = match statement.kind() {
            StatementKind::Query => self
                .database
                .fetch_all(statement)
                .await
                .map(QueryOutcome::Rows),
            StatementKind::Command => self.database.execute(statement).await.map(|affected| {
                debug!(affected, "Statement applied");
                QueryOutcome::Done
            }),
        };

        result.unwrap_or_else(|e| {
            error!(error = %e, sql = %statement, "Statement failed");
            if e.is_connection_error() {
                self.set_status(ConnectionStatus::Error);
            }
            self.alerts.alert(DATABASE_ERROR_TITLE, &e.to_string());
            QueryOutcome::Failed
        })
    }

    async fn ensure_connected(&self) -> bool {
        if self.database.is_connected().await {
            return true;
        }

        warn!("Database connection lost, reconnecting");
        self.set_status(ConnectionStatus::Reconnecting);

        match self.database.connect().await {
            Ok(()) => {
                info!("Database reconnected");
                self.set_status(ConnectionStatus::Connected);
                true
            }
            Err(e) => {
                warn!(error = %e, "Reconnect failed");
                self.set_status(ConnectionStatus::Error);
                false
            }
        }
    }

    /// Current connection status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        *self.status.read()
    }

    fn set_status(&self, status: ConnectionStatus) {
        *self.status.write() = status;
    }

    /// Closes the connection.
    pub async fn shutdown(&self) {
        self.database.close().await;
        self.set_status(ConnectionStatus::Disconnected);
    }
}
