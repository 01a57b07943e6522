use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roadrev::application::DatabaseGateway;
use roadrev::application::services::DATABASE_ERROR_TITLE;
use roadrev::domain::DatabasePort;
use roadrev::domain::entities::EntityConfig;
use roadrev::infrastructure::database::schema;
use roadrev::infrastructure::{AppConfig, CliArgs, IconSet, SqliteDatabase, StorageManager};
use roadrev::presentation::ui::{DialogQueue, ErrorMessage, show_startup_error};
use roadrev::presentation::widgets::DASHBOARD_LABEL;
use roadrev::presentation::{App, Theme};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn load_icons(config: &AppConfig) -> IconSet {
    let catalog = EntityConfig::catalog();
    let names = std::iter::once(DASHBOARD_LABEL).chain(catalog.iter().map(EntityConfig::display_name));
    let icons = IconSet::load(config.effective_icons_dir().as_deref(), names);
    info!(count = icons.len(), "Icons loaded");
    icons
}

/// Connects, optionally creates the schema, then runs the UI. Startup
/// failures are shown in a dialog before the error is returned.
async fn run(
    terminal: &mut DefaultTerminal,
    config: &AppConfig,
    bootstrap_schema: bool,
) -> Result<()> {
    let theme = Theme::new(&config.theme.accent_color, config.theme.mode);

    let startup = async {
        let database = Arc::new(SqliteDatabase::new(&config.database.url)?);
        let dialogs = Arc::new(DialogQueue::new());
        let gateway = Arc::new(DatabaseGateway::new(
            Arc::clone(&database) as Arc<dyn DatabasePort>,
            dialogs.clone(),
        ));
        gateway.open().await?;
        if bootstrap_schema {
            schema::bootstrap(database.as_ref()).await?;
        }
        Ok::<_, roadrev::domain::DatabaseError>((gateway, dialogs))
    };

    let (gateway, dialogs) = match startup.await {
        Ok(ready) => ready,
        Err(e) => {
            error!(error = %e, url = %config.database.url, "Startup failed");
            let message = ErrorMessage {
                title: DATABASE_ERROR_TITLE.to_string(),
                message: e.to_string(),
            };
            show_startup_error(terminal, &theme, &message).await?;
            return Err(e.into());
        }
    };

    let app = App::new(
        gateway,
        dialogs,
        theme,
        config.toast_duration(),
        &load_icons(config),
    );
    app.run(terminal).await
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = roadrev::VERSION, "Starting Roadrev");

    let mut terminal = ratatui::init();

    let result = run(&mut terminal, &config, args.bootstrap_schema).await;

    ratatui::restore();

    result
}
