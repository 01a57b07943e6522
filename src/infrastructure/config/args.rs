//! Command-line arguments.

use super::app_config::{LogLevel, ThemeMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "roadrev",
    version,
    about = "Service management console for a vehicle-service business",
    long_about = None
)]
/// Command-line flags; each one overrides the config file.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Database URL.
    #[arg(long, env = "ROADREV_DATABASE_URL", value_name = "URL")]
    pub database_url: Option<String>,

    /// Directory holding optional sidebar icon files.
    #[arg(long, value_name = "PATH")]
    pub icons_dir: Option<PathBuf>,

    /// How long success toasts stay visible, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub toast_duration_ms: Option<u64>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Initial theme.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Create the business tables if they do not exist, then start.
    #[arg(long)]
    pub bootstrap_schema: bool,
}
