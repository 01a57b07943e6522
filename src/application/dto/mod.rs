//! Data transfer objects for the application layer.

mod dashboard_dto;
mod write_outcome;

pub use dashboard_dto::{CardSpec, DASHBOARD_CARDS, StatCard};
pub use write_outcome::WriteOutcome;
