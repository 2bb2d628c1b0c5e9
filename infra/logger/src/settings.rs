use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::error::LoggerError;

/// Output layout of every enabled log sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Deserializable logging section of an application config file.
///
/// ```toml
/// [log]
/// level = "debug"
/// format = "json"
/// directory = "logs"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    pub format: LogFormat,
    /// Directory for rolling log files. Console only when absent.
    pub directory: Option<PathBuf>,
    /// Extra `EnvFilter` directives, e.g. `omap_factory=trace`.
    pub filter: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: LogFormat::Compact, directory: None, filter: None }
    }
}

impl LogSettings {
    /// Parses [`LogSettings::level`].
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        LevelFilter::from_str(self.level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid log level '{}': {e}", self.level).into(),
            context: None,
        })
    }
}
