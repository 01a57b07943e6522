//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services shared by the screens.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{StatCard, WriteOutcome};
pub use services::{DatabaseGateway, NotificationManager, QueryOutcome};
pub use use_cases::{DashboardUseCase, EntityUseCase};
