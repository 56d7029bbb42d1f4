//! Configuration management.
//!
//! Configuration is resolved in layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (explicit path, or the default location)
//! 3. `ETYMON_*` environment variables (a `.env` file is loaded by the binary)
//!
//! ```toml
//! [storage]
//! db_path = "/data/etymology.db"
//! pool_size = 4
//!
//! [traversal]
//! max_depth = 32
//!
//! [logging]
//! format = "json"
//! ```

use crate::models::DEFAULT_ENTRY_LIMIT;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default ceiling for both traversals.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default number of candidates considered when resolving a canonical entry.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 20;

/// Default language of canonical entries.
pub const DEFAULT_CANONICAL_LANG_CODE: &str = "en";

/// Main configuration for etymon.
#[derive(Debug, Clone, Default)]
pub struct EtymonConfig {
    /// Word graph storage.
    pub storage: StorageConfig,
    /// Traversal defaults.
    pub traversal: TraversalConfig,
    /// Logging settings (resolved by [`crate::observability`]).
    pub logging: LoggingSettings,
}

/// Word graph storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the pre-populated database.
    pub db_path: PathBuf,
    /// Number of read-only connections to keep open.
    pub pool_size: usize,
    /// How long a query waits on a locked database.
    pub busy_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("etymology.db"),
            pool_size: 4,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

impl StorageConfig {
    /// Storage configuration for a database path, other values defaulted.
    #[must_use]
    pub fn for_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

/// Traversal and lookup defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Depth ceiling when a call does not set one.
    pub max_depth: usize,
    /// Candidates fetched when resolving a canonical entry.
    pub candidate_limit: usize,
    /// Language code canonical entries are drawn from.
    pub canonical_lang_code: String,
    /// Default cap for word lookups.
    pub default_limit: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            canonical_lang_code: DEFAULT_CANONICAL_LANG_CODE.to_string(),
            default_limit: DEFAULT_ENTRY_LIMIT,
        }
    }
}

/// Logging settings as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// `tracing` filter directive, e.g. `etymon=debug`.
    pub filter: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Storage section.
    pub storage: Option<ConfigFileStorage>,
    /// Traversal section.
    pub traversal: Option<ConfigFileTraversal>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Storage section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileStorage {
    /// Database path.
    pub db_path: Option<String>,
    /// Pool size.
    pub pool_size: Option<usize>,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: Option<u64>,
}

/// Traversal section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileTraversal {
    /// Depth ceiling.
    pub max_depth: Option<usize>,
    /// Canonical candidate cap.
    pub candidate_limit: Option<usize>,
    /// Canonical language code.
    pub canonical_lang_code: Option<String>,
    /// Default lookup cap.
    pub default_limit: Option<usize>,
}

impl EtymonConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid
    /// values.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::Config {
            cause: e.to_string(),
        })?;

        let config = Self::from_config_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Path of the default configuration file, if one exists.
    ///
    /// Checks the platform config dir first, then `~/.config/etymon/`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let base_dirs = directories::BaseDirs::new()?;

        let platform_config = base_dirs.config_dir().join("etymon").join("config.toml");
        if platform_config.exists() {
            return Some(platform_config);
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("etymon")
            .join("config.toml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Loads configuration from the default location, or defaults if there is
    /// no config file.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but is invalid.
    pub fn load_default() -> Result<Self> {
        Self::default_path().map_or_else(|| Ok(Self::default()), |path| Self::load_from_file(&path))
    }

    /// Converts a `ConfigFile` to `EtymonConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(storage) = file.storage {
            if let Some(db_path) = storage.db_path {
                config.storage.db_path = PathBuf::from(db_path);
            }
            if let Some(pool_size) = storage.pool_size {
                config.storage.pool_size = pool_size;
            }
            if let Some(ms) = storage.busy_timeout_ms {
                config.storage.busy_timeout = Duration::from_millis(ms);
            }
        }
        if let Some(traversal) = file.traversal {
            if let Some(max_depth) = traversal.max_depth {
                config.traversal.max_depth = max_depth;
            }
            if let Some(limit) = traversal.candidate_limit {
                config.traversal.candidate_limit = limit;
            }
            if let Some(lang) = traversal.canonical_lang_code {
                config.traversal.canonical_lang_code = lang;
            }
            if let Some(limit) = traversal.default_limit {
                config.traversal.default_limit = limit;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies `ETYMON_*` environment overrides.
    ///
    /// | Variable | Overrides |
    /// |----------|-----------|
    /// | `ETYMON_DB` | `storage.db_path` |
    /// | `ETYMON_POOL_SIZE` | `storage.pool_size` |
    /// | `ETYMON_MAX_DEPTH` | `traversal.max_depth` |
    /// | `ETYMON_LOG_FORMAT` | `logging.format` |
    /// | `ETYMON_LOG_FILE` | `logging.file` |
    ///
    /// Unparsable numbers are ignored with a warning.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable source.
    #[must_use]
    pub fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(db) = var("ETYMON_DB").filter(|v| !v.is_empty()) {
            self.storage.db_path = PathBuf::from(db);
        }
        if let Some(size) = parse_usize_var(&var, "ETYMON_POOL_SIZE") {
            self.storage.pool_size = size;
        }
        if let Some(depth) = parse_usize_var(&var, "ETYMON_MAX_DEPTH") {
            self.traversal.max_depth = depth;
        }
        if let Some(format) = var("ETYMON_LOG_FORMAT").filter(|v| !v.is_empty()) {
            self.logging.format = Some(format);
        }
        if let Some(file) = var("ETYMON_LOG_FILE").filter(|v| !v.is_empty()) {
            self.logging.file = Some(PathBuf::from(file));
        }
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.db_path = path.into();
        self
    }

    /// Rejects values no component can work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a zero pool size or candidate limit,
    /// or an empty canonical language code.
    pub fn validate(&self) -> Result<()> {
        if self.storage.pool_size == 0 {
            return Err(Error::InvalidInput(
                "storage.pool_size must be at least 1".to_string(),
            ));
        }
        if self.traversal.candidate_limit == 0 {
            return Err(Error::InvalidInput(
                "traversal.candidate_limit must be at least 1".to_string(),
            ));
        }
        if self.traversal.canonical_lang_code.trim().is_empty() {
            return Err(Error::InvalidInput(
                "traversal.canonical_lang_code must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_usize_var(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring unparsable override");
            None
        },
    }
}
