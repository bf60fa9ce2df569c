//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::api::DEFAULT_COOKIE_NAME;

const APP_NAME: &str = "rotina";
const APP_QUALIFIER: &str = "app";
const APP_ORGANIZATION: &str = "rotina";

/// Log verbosity, lowest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API origin. Empty selects `http://localhost:3000`.
    #[serde(default)]
    pub base_url: String,

    /// Name of the session cookie the backend issues.
    #[serde(default = "default_cookie_name")]
    pub session_cookie_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            session_cookie_name: default_cookie_name(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Format for task creation timestamps (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Number of recent tasks listed on the home page.
    #[serde(default = "default_home_list_limit")]
    pub home_list_limit: usize,

    /// Enable `TachyonFX` animations.
    #[serde(default = "default_true")]
    pub enable_animations: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            home_list_limit: default_home_list_limit(),
            enable_animations: true,
        }
    }
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_timestamp_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

const fn default_home_list_limit() -> usize {
    5
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.api_base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(cookie_name) = &args.session_cookie_name {
            self.api.session_cookie_name.clone_from(cookie_name);
        }
        if let Some(enable_animations) = args.enable_animations {
            self.ui.enable_animations = enable_animations;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Per-user directory holding `config.toml`.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Log file, `--log-path` first, then the platform data directory.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join(format!("{APP_NAME}.log")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "https://rotina.example.com"

            [ui]
            home_list_limit = 3
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "https://rotina.example.com");
        assert_eq!(config.api.session_cookie_name, "session");
        assert_eq!(config.ui.home_list_limit, 3);
        assert!(config.ui.enable_animations);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.api.base_url.is_empty());
        assert_eq!(config.ui.home_list_limit, 5);
        assert!(config.ui.enable_animations);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "rotina",
            "--api-base-url",
            "http://10.0.0.2:3000",
            "--enable-animations",
            "false",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api.base_url, "http://10.0.0.2:3000");
        assert!(!config.ui.enable_animations);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
