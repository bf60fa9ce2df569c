//! Infrastructure layer with external service adapters.

/// REST API client.
pub mod api;
pub mod browser;
/// Application configuration.
pub mod config;
/// Session storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use browser::BrowserLauncher;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use storage::KeyringSessionStorage;
