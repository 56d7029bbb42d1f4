//! Structured logging configuration.

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive; `RUST_LOG` is the fallback.
pub const LOG_FILTER_ENV: &str = "ETYMON_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown log format '{other}' (expected 'pretty' or 'json')"
            ))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolves settings against the environment.
    ///
    /// Filter precedence: `ETYMON_LOG`, then `RUST_LOG`, then the config file,
    /// then `debug` when verbose or `info` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown format or a malformed filter directive.
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Result<Self> {
        Self::from_sources(settings, verbose, |key| std::env::var(key).ok())
    }

    /// Resolves settings against an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown format or a malformed filter directive.
    pub fn from_sources(
        settings: &LoggingSettings,
        verbose: bool,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let format = settings
            .format
            .as_deref()
            .map(LogFormat::from_str)
            .transpose()?
            .unwrap_or_default();

        let directive = var(LOG_FILTER_ENV)
            .or_else(|| var("RUST_LOG"))
            .filter(|v| !v.trim().is_empty())
            .or_else(|| settings.filter.clone())
            .unwrap_or_else(|| if verbose { "debug" } else { "info" }.to_string());

        let filter = EnvFilter::try_new(&directive).map_err(|e| Error::Config {
            cause: format!("invalid log filter '{directive}': {e}"),
        })?;

        Ok(Self {
            format,
            filter,
            file: settings.file.clone(),
        })
    }
}
