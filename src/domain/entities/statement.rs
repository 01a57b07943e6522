//! SQL statements with positional parameters.
//!
//! Every statement the application issues is built here from an
//! [`EntityConfig`]. Identifiers come from the fixed entity catalog; user input
//! only ever travels as bound parameters.

use std::fmt;

use super::EntityConfig;

const PLACEHOLDER: &str = "?";

/// Whether a statement returns rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `SELECT`-shaped, yields records.
    Query,
    /// Anything else, yields a success flag.
    Command,
}

/// SQL text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<String>,
}

impl Statement {
    /// Creates a statement from raw text.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Creates a statement without parameters.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// `SELECT * FROM <table>`
    #[must_use]
    pub fn select_all(config: &EntityConfig) -> Self {
        Self::raw(format!("SELECT * FROM {}", config.table()))
    }

    /// `INSERT INTO <table> (<fields>) VALUES (?, ...)`
    #[must_use]
    pub fn insert(config: &EntityConfig, values: Vec<String>) -> Self {
        let columns = config.field_names().collect::<Vec<_>>().join(", ");
        let placeholders = vec![PLACEHOLDER; config.fields().len()].join(", ");
        Self::new(
            format!(
                "INSERT INTO {} ({columns}) VALUES ({placeholders})",
                config.table()
            ),
            values,
        )
    }

    /// `UPDATE <table> SET f=?, ... WHERE <pk>=?`
    #[must_use]
    pub fn update(config: &EntityConfig, values: Vec<String>, key: String) -> Self {
        let assignments = config
            .field_names()
            .map(|name| format!("{name}={PLACEHOLDER}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut params = values;
        params.push(key);
        Self::new(
            format!(
                "UPDATE {} SET {assignments} WHERE {}={PLACEHOLDER}",
                config.table(),
                config.primary_key().name()
            ),
            params,
        )
    }

    /// `DELETE FROM <table> WHERE <pk>=?`
    #[must_use]
    pub fn delete(config: &EntityConfig, key: String) -> Self {
        Self::new(
            format!(
                "DELETE FROM {} WHERE {}={PLACEHOLDER}",
                config.table(),
                config.primary_key().name()
            ),
            vec![key],
        )
    }

    /// `SELECT * FROM <table> WHERE f1 LIKE ? OR ...` matching `term` as a
    /// substring of any field.
    #[must_use]
    pub fn search(config: &EntityConfig, term: &str) -> Self {
        let conditions = config
            .field_names()
            .map(|name| format!("{name} LIKE {PLACEHOLDER}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let pattern = format!("%{term}%");
        Self::new(
            format!("SELECT * FROM {} WHERE {conditions}", config.table()),
            vec![pattern; config.fields().len()],
        )
    }

    /// `SELECT COUNT(*) AS c FROM <table>`
    #[must_use]
    pub fn count(table: &str) -> Self {
        Self::raw(format!("SELECT COUNT(*) AS {COUNT_ALIAS} FROM {table}"))
    }

    /// SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters in order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Classifies by the leading keyword.
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        let head = self.sql.trim_start();
        let is_select = head
            .get(..6)
            .is_some_and(|keyword| keyword.eq_ignore_ascii_case("SELECT"));
        if is_select {
            StatementKind::Query
        } else {
            StatementKind::Command
        }
    }

    /// Whether the statement changes data.
    #[must_use]
    pub fn is_write(&self) -> bool {
        self.kind() == StatementKind::Command
    }
}

/// Column alias used by [`Statement::count`].
pub const COUNT_ALIAS: &str = "c";

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EntityConfig {
        EntityConfig::find("Services").unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_all() {
        let stmt = Statement::select_all(&service());
        assert_eq!(stmt.sql(), "SELECT * FROM Service");
        assert!(stmt.params().is_empty());
        assert_eq!(stmt.kind(), StatementKind::Query);
    }

    #[test]
    fn test_insert() {
        let stmt = Statement::insert(&service(), strings(&["1", "OilChange", "49.99"]));
        assert_eq!(
            stmt.sql(),
            "INSERT INTO Service (ServiceID, SName, Cost) VALUES (?, ?, ?)"
        );
        assert_eq!(stmt.params(), strings(&["1", "OilChange", "49.99"]));
        assert!(stmt.is_write());
    }

    #[test]
    fn test_update_filters_on_primary_key() {
        let stmt = Statement::update(
            &service(),
            strings(&["1", "Tyres", "80"]),
            "1".to_string(),
        );
        assert_eq!(
            stmt.sql(),
            "UPDATE Service SET ServiceID=?, SName=?, Cost=? WHERE ServiceID=?"
        );
        assert_eq!(stmt.params(), strings(&["1", "Tyres", "80", "1"]));
    }

    #[test]
    fn test_update_uses_declared_key() {
        let config = service().with_primary_key("SName");
        let stmt = Statement::update(&config, strings(&["1", "Tyres", "80"]), "Tyres".into());
        assert!(stmt.sql().ends_with("WHERE SName=?"));
    }

    #[test]
    fn test_delete() {
        let stmt = Statement::delete(&service(), "3".to_string());
        assert_eq!(stmt.sql(), "DELETE FROM Service WHERE ServiceID=?");
        assert_eq!(stmt.params(), strings(&["3"]));
    }

    #[test]
    fn test_search_or_chain() {
        let stmt = Statement::search(&service(), "oil");
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM Service WHERE ServiceID LIKE ? OR SName LIKE ? OR Cost LIKE ?"
        );
        assert_eq!(stmt.params(), strings(&["%oil%", "%oil%", "%oil%"]));
    }

    #[test]
    fn test_count() {
        let stmt = Statement::count("Client");
        assert_eq!(stmt.sql(), "SELECT COUNT(*) AS c FROM Client");
    }

    #[test]
    fn test_kind_is_case_insensitive_and_trims() {
        assert_eq!(Statement::raw("  select 1").kind(), StatementKind::Query);
        assert_eq!(Statement::raw("SEL").kind(), StatementKind::Command);
        assert_eq!(Statement::raw("DELETE FROM x").kind(), StatementKind::Command);
    }
}
