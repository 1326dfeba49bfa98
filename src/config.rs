//! Application-level configuration loading: database location and the shared API key.

use std::{env, fs, io::ErrorKind, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PIXEL_SURVIVOR_CONFIG_PATH";
/// Environment variable that overrides the configured database path.
const DB_PATH_ENV: &str = "PIXEL_SURVIVOR_DB_PATH";
/// Environment variable that overrides the configured API key.
const API_KEY_ENV: &str = "PIXEL_SURVIVOR_API_KEY";

/// Database file used when neither the config file nor the environment set one.
const DEFAULT_DB_PATH: &str = "data/pixel_survivor.db";
/// Shared secret used when neither the config file nor the environment set one.
const DEFAULT_API_KEY: &str = "pixel-survivor-2024-secret";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    database_path: PathBuf,
    api_key: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    ///
    /// Environment overrides ([`DB_PATH_ENV`], [`API_KEY_ENV`]) win over the
    /// config file in both directions.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let base = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        base.with_env_overrides()
    }

    /// Build a configuration directly, bypassing disk and environment lookups.
    pub fn new(database_path: PathBuf, api_key: String) -> Self {
        Self {
            database_path,
            api_key,
        }
    }

    /// Path of the SQLite database file holding scores and saves.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Shared secret expected in the `X-API-Key` header for write endpoints.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env::var_os(DB_PATH_ENV).filter(|value| !value.is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            self.api_key = key;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            api_key: DEFAULT_API_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    database_path: Option<PathBuf>,
    #[serde(default)]
    api_key: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            database_path: value.database_path.unwrap_or(defaults.database_path),
            api_key: value.api_key.unwrap_or(defaults.api_key),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
