//! Use case implementations.

mod dashboard_use_case;
mod entity_use_case;

pub use dashboard_use_case::DashboardUseCase;
pub use entity_use_case::{EntityUseCase, GridRows};
