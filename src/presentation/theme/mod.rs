//! Color themes.

pub mod adapter;
mod service;

pub use service::Theme;
