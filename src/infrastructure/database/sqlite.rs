//! SQLite adapter for the database port.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, Sqlite, TypeInfo, ValueRef};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::{CellValue, Record, Statement};
use crate::domain::errors::DatabaseError;
use crate::domain::ports::DatabasePort;

const IN_MEMORY_URL: &str = "sqlite::memory:";

type BoundQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// One autocommitted SQLite connection.
pub struct SqliteDatabase {
    options: SqliteConnectOptions,
    connection: Mutex<Option<SqliteConnection>>,
}

impl SqliteDatabase {
    /// Creates an adapter for `url` without connecting.
    ///
    /// # Errors
    /// Returns error if the URL cannot be parsed.
    pub fn new(url: &str) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DatabaseError::connection(e.to_string()))?
            .create_if_missing(true);
        Ok(Self::with_options(options))
    }

    /// Creates an adapter from prepared options.
    #[must_use]
    pub fn with_options(options: SqliteConnectOptions) -> Self {
        Self {
            options,
            connection: Mutex::new(None),
        }
    }

    /// Creates an adapter for a private in-memory database. Every
    /// (re)connect starts from an empty database.
    ///
    /// # Errors
    /// Returns error if the options cannot be built.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Self::new(IN_MEMORY_URL)
    }

    fn bind(statement: &Statement) -> BoundQuery<'_> {
        statement
            .params()
            .iter()
            .fold(sqlx::query(statement.sql()), |query, param| {
                query.bind(param.as_str())
            })
    }
}

fn statement_error(error: sqlx::Error) -> DatabaseError {
    match error {
        sqlx::Error::Io(e) => DatabaseError::connection(e.to_string()),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => DatabaseError::NotConnected,
        other => DatabaseError::statement(other.to_string()),
    }
}

fn cell(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let type_name = raw.type_info().name().to_ascii_uppercase();

    let value = match type_name.as_str() {
        "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => CellValue::Integer(row.try_get_unchecked(index)?),
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => CellValue::Real(row.try_get_unchecked(index)?),
        "BLOB" => CellValue::Blob(row.try_get_unchecked(index)?),
        _ => CellValue::Text(row.try_get_unchecked(index)?),
    };
    Ok(value)
}

fn to_record(row: &SqliteRow) -> Result<Record, DatabaseError> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = cell(row, column.ordinal()).map_err(|e| DatabaseError::UnsupportedType {
            column: column.name().to_string(),
            type_name: e.to_string(),
        })?;
        record.push(column.name(), value);
    }
    Ok(record)
}

#[async_trait]
impl DatabasePort for SqliteDatabase {
    async fn connect(&self) -> Result<(), DatabaseError> {
        let connection = self
            .options
            .connect()
            .await
            .map_err(|e| DatabaseError::connection(e.to_string()))?;

        let previous = self.connection.lock().await.replace(connection);
        if let Some(previous) = previous
            && let Err(e) = previous.close().await
        {
            debug!(error = %e, "Failed to close replaced connection");
        }

        info!(
            filename = %self.options.get_filename().display(),
            "Database connection opened"
        );
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        let mut guard = self.connection.lock().await;
        match guard.as_mut() {
            Some(connection) => connection.ping().await.is_ok(),
            None => false,
        }
    }

    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>, DatabaseError> {
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DatabaseError::NotConnected)?;

        let rows = Self::bind(statement)
            .fetch_all(&mut *connection)
            .await
            .map_err(statement_error)?;

        rows.iter().map(to_record).collect()
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DatabaseError::NotConnected)?;

        let result = Self::bind(statement)
            .execute(&mut *connection)
            .await
            .map_err(statement_error)?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        if let Some(connection) = self.connection.lock().await.take() {
            match connection.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!(error = %e, "Failed to close database connection"),
            }
        }
    }
}
