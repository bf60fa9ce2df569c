use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rotina::infrastructure::{
    ApiClient, AppConfig, CliArgs, KeyringSessionStorage, StorageManager,
};
use rotina::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));

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
    let mut config = match StorageManager::new() {
        Ok(storage) => storage
            .load_config(args.config.as_deref())
            .wrap_err("failed to load configuration")?,
        Err(_) => AppConfig::default(),
    };
    config.merge_with_args(args);
    Ok(config)
}

fn create_app() -> Result<(App, Option<String>)> {
    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config).wrap_err("failed to initialize logging")?;

    info!(version = rotina::VERSION, base_url = %config.api.base_url, "Starting rotina");

    let api_client = Arc::new(
        ApiClient::new(&config.api.base_url, config.api.session_cookie_name.clone())
            .wrap_err("failed to create API client")?,
    );
    let session_storage = Arc::new(KeyringSessionStorage::new());

    let app = App::new(
        api_client.clone(),
        api_client,
        session_storage,
        config.ui,
    );

    Ok((app, args.session))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let (app, cli_session) = create_app()?;

    let mut terminal = ratatui::init();

    let result = match execute!(stdout(), EnableBracketedPaste) {
        Ok(()) => app.run(&mut terminal, cli_session).await,
        Err(e) => Err(e).wrap_err("failed to enable bracketed paste"),
    };

    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}
