use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rotina",
    version,
    about = "A terminal client for the gamified routine tracker",
    long_about = None
)]
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

    /// API origin, e.g. `https://rotina.example.com`.
    #[arg(long, env = "ROTINA_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Name of the backend session cookie.
    #[arg(long, value_name = "NAME")]
    pub session_cookie_name: Option<String>,

    /// Session cookie value to sign in with.
    #[arg(long, env = "ROTINA_SESSION", hide_env_values = true, value_name = "COOKIE")]
    pub session: Option<String>,

    /// Enable `TachyonFX` animations.
    #[arg(long)]
    pub enable_animations: Option<bool>,
}
