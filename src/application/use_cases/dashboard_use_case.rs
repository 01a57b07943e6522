//! Aggregate counts for the dashboard.

use std::sync::Arc;

use tracing::debug;

use crate::application::dto::{CardSpec, DASHBOARD_CARDS, StatCard};
use crate::application::services::DatabaseGateway;
use crate::domain::entities::{COUNT_ALIAS, Statement};

/// Loads the dashboard cards.
#[derive(Clone)]
pub struct DashboardUseCase {
    gateway: Arc<DatabaseGateway>,
}

impl DashboardUseCase {
    /// Creates the use case over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<DatabaseGateway>) -> Self {
        Self { gateway }
    }

    /// One card per [`DASHBOARD_CARDS`] entry, in order. A failed or empty
    /// count shows as `0`.
    pub async fn load_cards(&self) -> Vec<StatCard> {
        let mut cards = Vec::with_capacity(DASHBOARD_CARDS.len());
        for spec in &DASHBOARD_CARDS {
            cards.push(StatCard {
                title: spec.title,
                count: self.count(spec).await,
            });
        }
        cards
    }

    async fn count(&self, spec: &CardSpec) -> i64 {
        let count = self
            .gateway
            .execute(&Statement::count(spec.table))
            .await
            .into_rows()
            .and_then(|rows| rows.first().and_then(|r| r.get(COUNT_ALIAS)?.as_i64()))
            .unwrap_or(0);
        debug!(table = spec.table, count, "Dashboard count");
        count
    }
}
