//! CRUD operations for one configured entity.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::application::dto::WriteOutcome;
use crate::application::services::DatabaseGateway;
use crate::domain::entities::{EntityConfig, Record, Statement};

/// Grid rows: one rendered string per configured field.
pub type GridRows = Vec<Vec<String>>;

/// Issues the canonical statements for an entity through the gateway.
#[derive(Clone)]
pub struct EntityUseCase {
    config: EntityConfig,
    gateway: Arc<DatabaseGateway>,
}

impl EntityUseCase {
    /// Creates a use case bound to `config`.
    #[must_use]
    pub const fn new(config: EntityConfig, gateway: Arc<DatabaseGateway>) -> Self {
        Self { config, gateway }
    }

    /// Entity configuration.
    #[must_use]
    pub const fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Fetches every row. `None` means the query failed.
    pub async fn load(&self) -> Option<GridRows> {
        self.fetch(&Statement::select_all(&self.config)).await
    }

    /// Rows where any field contains `term`; an empty term loads everything.
    pub async fn search(&self, term: &str) -> Option<GridRows> {
        if term.is_empty() {
            return self.load().await;
        }
        debug!(entity = self.config.table(), term, "Searching");
        self.fetch(&Statement::search(&self.config, term)).await
    }

    async fn fetch(&self, statement: &Statement) -> Option<GridRows> {
        let rows = self.gateway.execute(statement).await.into_rows()?;
        Some(self.project(&rows))
    }

    fn project(&self, rows: &[Record]) -> GridRows {
        rows.iter()
            .map(|record| record.project(self.config.field_names()))
            .collect()
    }

    /// Applies auto-fill rules and the emptiness check to raw form values.
    ///
    /// Returns `None` when every user-editable value is empty.
    #[must_use]
    pub fn prepare_insert(&self, mut values: Vec<String>, now: &DateTime<Local>) -> Option<Vec<String>> {
        values.resize(self.config.fields().len(), String::new());

        let mut has_input = false;
        for (field, value) in self.config.fields().iter().zip(values.iter_mut()) {
            match field.auto_fill() {
                Some(rule) => *value = rule.render(now),
                None => has_input |= !value.is_empty(),
            }
        }

        has_input.then_some(values)
    }

    /// Inserts the form values, stamping auto-filled fields with the current
    /// time.
    pub async fn add(&self, values: Vec<String>) -> WriteOutcome {
        self.add_at(values, &Local::now()).await
    }

    /// [`EntityUseCase::add`] with an explicit clock.
    pub async fn add_at(&self, values: Vec<String>, now: &DateTime<Local>) -> WriteOutcome {
        let Some(values) = self.prepare_insert(values, now) else {
            debug!(entity = self.config.table(), "Add skipped, form is empty");
            return WriteOutcome::Skipped;
        };
        self.write(Statement::insert(&self.config, values)).await
    }

    /// Updates every field of the row whose key equals the key field's form
    /// value.
    pub async fn update(&self, values: Vec<String>) -> WriteOutcome {
        let Some(key) = values.get(self.config.primary_key_index()).cloned() else {
            return WriteOutcome::Skipped;
        };
        self.write(Statement::update(&self.config, values, key)).await
    }

    /// Deletes the row with primary key `key`.
    pub async fn delete(&self, key: String) -> WriteOutcome {
        self.write(Statement::delete(&self.config, key)).await
    }

    async fn write(&self, statement: Statement) -> WriteOutcome {
        if self.gateway.execute(&statement).await.is_success() {
            info!(entity = self.config.table(), sql = %statement, "Record written");
            WriteOutcome::Written
        } else {
            WriteOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CellValue;
    use crate::domain::ports::mocks::{MockDatabase, RecordingAlerts};
    use chrono::TimeZone;

    fn use_case(display_name: &str, db: &Arc<MockDatabase>) -> EntityUseCase {
        let gateway = Arc::new(DatabaseGateway::new(
            db.clone(),
            Arc::new(RecordingAlerts::new()),
        ));
        EntityUseCase::new(EntityConfig::find(display_name).unwrap(), gateway)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 12, 10, 14, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_load_issues_one_unfiltered_select_for_every_entity() {
        for config in EntityConfig::catalog() {
            let db = Arc::new(MockDatabase::new());
            let use_case = use_case(config.display_name(), &db);

            use_case.load().await.unwrap();

            let statements = db.statements();
            assert_eq!(statements.len(), 1);
            assert_eq!(
                statements[0].sql(),
                format!("SELECT * FROM {}", config.table())
            );
        }
    }

    #[tokio::test]
    async fn test_load_projects_configured_fields_in_row_order() {
        let db = Arc::new(MockDatabase::with_rows(vec![
            Record::new()
                .with("Cost", 10.5)
                .with("SName", "Wash")
                .with("ServiceID", 2_i64)
                .with("Extra", "ignored"),
            Record::new()
                .with("ServiceID", 1_i64)
                .with("SName", "OilChange")
                .with("Cost", 49.99),
        ]));
        let rows = use_case("Services", &db).load().await.unwrap();

        assert_eq!(
            rows,
            vec![
                strings(&["2", "Wash", "10.5"]),
                strings(&["1", "OilChange", "49.99"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_none() {
        let db = Arc::new(MockDatabase::new());
        db.set_fail_statements(true);
        assert!(use_case("Services", &db).load().await.is_none());
    }

    #[tokio::test]
    async fn test_add_empty_form_writes_nothing() {
        let db = Arc::new(MockDatabase::new());
        let outcome = use_case("Services", &db).add(strings(&["", "", ""])).await;

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert!(db.statements().is_empty());
    }

    #[tokio::test]
    async fn test_add_service() {
        let db = Arc::new(MockDatabase::new());
        let outcome = use_case("Services", &db)
            .add(strings(&["1", "OilChange", "49.99"]))
            .await;

        assert_eq!(outcome, WriteOutcome::Written);
        let writes = db.writes();
        assert_eq!(
            writes[0].sql(),
            "INSERT INTO Service (ServiceID, SName, Cost) VALUES (?, ?, ?)"
        );
        assert_eq!(writes[0].params(), strings(&["1", "OilChange", "49.99"]));
    }

    #[tokio::test]
    async fn test_booking_add_overwrites_date_and_time() {
        let db = Arc::new(MockDatabase::new());
        let outcome = use_case("Bookings", &db)
            .add_at(strings(&["5", "1999-01-01", "09:00", "2", "3"]), &noon())
            .await;

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(
            db.writes()[0].params(),
            strings(&["5", "2025-12-10", "14:30", "2", "3"])
        );
    }

    #[tokio::test]
    async fn test_booking_auto_fields_do_not_count_as_input() {
        let db = Arc::new(MockDatabase::new());
        let outcome = use_case("Bookings", &db)
            .add_at(strings(&["", "typed", "typed", "", ""]), &noon())
            .await;

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert!(db.statements().is_empty());
    }

    #[test]
    fn test_prepare_insert_pads_short_forms() {
        let db = Arc::new(MockDatabase::new());
        let prepared = use_case("Bookings", &db)
            .prepare_insert(strings(&["9"]), &noon())
            .unwrap();
        assert_eq!(prepared, strings(&["9", "2025-12-10", "14:30", "", ""]));
    }

    #[tokio::test]
    async fn test_update_filters_on_key_form_value() {
        let db = Arc::new(MockDatabase::new());
        let outcome = use_case("Services", &db)
            .update(strings(&["4", "Tyres", "80"]))
            .await;

        assert!(outcome.is_written());
        let write = &db.writes()[0];
        assert!(write.sql().ends_with("WHERE ServiceID=?"));
        assert_eq!(write.params().last().map(String::as_str), Some("4"));
    }

    #[tokio::test]
    async fn test_delete_failure_reports_failed() {
        let db = Arc::new(MockDatabase::new());
        db.set_fail_statements(true);
        let outcome = use_case("Services", &db).delete("4".to_string()).await;
        assert_eq!(outcome, WriteOutcome::Failed);
    }

    #[tokio::test]
    async fn test_search_empty_term_is_load() {
        let db = Arc::new(MockDatabase::new());
        use_case("Clients", &db).search("").await.unwrap();
        assert_eq!(db.statements()[0].sql(), "SELECT * FROM Client");
    }

    #[tokio::test]
    async fn test_search_matches_substring_in_any_field() {
        let db = Arc::new(MockDatabase::with_rows(vec![Record::new().with(
            "SSN",
            CellValue::Integer(12),
        )]));
        let rows = use_case("Clients", &db).search("Smi").await.unwrap();

        let statement = &db.statements()[0];
        assert!(statement.sql().starts_with("SELECT * FROM Client WHERE SSN LIKE ?"));
        assert_eq!(statement.params().len(), 6);
        assert!(statement.params().iter().all(|p| p == "%Smi%"));
        assert_eq!(rows[0], strings(&["12", "", "", "", "", ""]));
    }
}
