//! Reads `config.toml`, seeding it with defaults on first run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::AppConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no per-user config directory on this platform")]
    NoConfigDir,
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode default config: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when the platform has no home directory.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub const fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads `path_override` or the default `config.toml`.
    ///
    /// A missing file is created with defaults. A file that does not parse is
    /// left as it is and defaults are used for this run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.config_path(), Path::to_path_buf);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Writing default config");
                let config = AppConfig::default();
                write_atomic(&path, &toml::to_string_pretty(&config)?)?;
                return Ok(config);
            }
            Err(e) => return Err(ConfigError::io(&path, e)),
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
                Ok(AppConfig::default())
            }
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::io(path, e))?;
    file.persist(path).map_err(|e| ConfigError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "Config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("rotina"));

        let config = manager.load_config(None).unwrap();

        assert_eq!(config.ui.home_list_limit, 5);
        let written = fs::read_to_string(manager.config_path()).unwrap();
        assert!(written.contains("[api]"));
        assert!(written.contains("session_cookie_name"));
    }

    #[test]
    fn test_unparsable_file_is_kept_and_defaults_used() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(manager.config_path(), "base_url = [").unwrap();

        let config = manager.load_config(None).unwrap();

        assert!(config.api.base_url.is_empty());
        assert_eq!(
            fs::read_to_string(manager.config_path()).unwrap(),
            "base_url = ["
        );
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().join("default"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[api]\nbase_url = \"http://192.168.0.10:3000\"\n").unwrap();

        let config = manager.load_config(Some(&custom)).unwrap();

        assert_eq!(config.api.base_url, "http://192.168.0.10:3000");
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_reading_a_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let manager = StorageManager::with_dir(dir.path().to_path_buf());

        let err = manager.load_config(Some(dir.path())).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
