/// Configuration file for the journal
///
/// Read from `~/.cafecito/config.toml` unless another path is given. A
/// missing file means defaults; every section and key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = ".cafecito";
const DATABASE_FILE: &str = "journal.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No writable location for the journal database: {0}")]
    NoDataDir(std::io::Error),

    #[error("Reflection API key not set: export {0}")]
    MissingApiKey(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub storage: StorageConfig,
    pub reflection: ReflectionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file; `None` picks the first writable default location
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Let the service search the web to verify suggestion links
    pub grounding: bool,
    pub thinking_budget: Option<u32>,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-3-pro-preview".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            timeout_secs: 300,
            grounding: true,
            thinking_budget: Some(12000),
        }
    }
}

impl ReflectionConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".into() }
    }
}

/// `~/.cafecito/config.toml`, or `None` without a home directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join("config.toml"))
}

impl JournalConfig {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Database path from the config, or the default location
    pub fn resolved_db_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.db_path {
            Some(path) => Ok(expand_tilde(path)),
            None => default_database_path(),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// First writable directory among home, data dir, config dir and cwd
///
/// Falls back to the temp directory when none of them can be written.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(APP_DIR)),
        dirs::data_dir().map(|p| p.join("cafecito")),
        dirs::config_dir().map(|p| p.join("cafecito")),
        std::env::current_dir().ok().map(|p| p.join(APP_DIR)),
    ];

    for dir in candidates.iter().flatten() {
        if is_writable_dir(dir) {
            return Ok(dir.join(DATABASE_FILE));
        }
    }

    let temp_dir = std::env::temp_dir().join("cafecito");
    std::fs::create_dir_all(&temp_dir).map_err(ConfigError::NoDataDir)?;
    tracing::warn!("Using temporary directory for the journal: {}", temp_dir.display());
    Ok(temp_dir.join(DATABASE_FILE))
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".write_probe");
    let writable = std::fs::write(&probe, b"ok").is_ok();
    let _ = std::fs::remove_file(&probe);
    writable
}
