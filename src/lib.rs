//! Roadrev - service management console for a vehicle-service business.
//!
//! Terminal front end over a relational database: a dashboard of aggregate
//! counts plus one create/read/update/delete/search screen per business
//! entity (clients, branches, garages, cars, bookings and services).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the database adapter, config and assets.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "roadrev";
