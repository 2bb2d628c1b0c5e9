use config::{Config, ConfigError, Environment, File, Map};
use omap_logger::LogSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{HarnessError, HarnessErrorExt};

const ENV_PREFIX: &str = "OMAP";
const DEFAULT_FILE: &str = "omap-harness";

/// Harness run settings.
///
/// Every field has a default, so an empty file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Measured calls per case.
    pub iterations: u64,
    /// Unmeasured calls per case before timing starts.
    pub warmup: u64,
    /// Concurrent tasks driving the async mapper.
    pub concurrency: usize,
    pub log: LogSettings,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { iterations: 100_000, warmup: 1_000, concurrency: 8, log: LogSettings::default() }
    }
}

impl HarnessConfig {
    /// Loads the configuration from `path` layered under `OMAP__` environment overrides.
    ///
    /// Without a path, `omap-harness.{toml,json,yaml,..}` in the working directory is read if
    /// present. Nested keys use `__` (e.g. `OMAP__LOG__LEVEL=debug`).
    ///
    /// # Errors
    /// Returns [`HarnessError::Config`] if an explicit file is missing, a value does not
    /// deserialize, or the result fails [`HarnessConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, HarnessError> {
        ConfigLoader::new().path(path).load()
    }

    /// Rejects settings the harness cannot run with.
    ///
    /// # Errors
    /// Returns [`HarnessError::Config`] for zero `iterations` or zero `concurrency`.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(invalid("iterations must be greater than zero"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency must be greater than zero"));
        }
        self.log.level_filter().map_err(|e| invalid(&e.to_string()))?;
        Ok(())
    }
}

/// Layered loader behind [`HarnessConfig::load`].
///
/// The environment source can be replaced, which keeps tests off the process environment.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, path: Option<&Path>) -> Self {
        self.path = path.map(Path::to_path_buf);
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// # Errors
    /// See [`HarnessConfig::load`].
    pub fn load(self) -> Result<HarnessConfig, HarnessError> {
        let file = match &self.path {
            Some(path) => {
                debug!("Loading harness config from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env),
            )
            .build()
            .context("Failed to build harness config")?
            .try_deserialize::<HarnessConfig>()
            .context("Failed to deserialize harness config")?;

        config.validate()?;
        Ok(config)
    }
}

fn invalid(message: &str) -> HarnessError {
    HarnessError::Config { source: ConfigError::Message(message.to_owned()), context: None }
}
