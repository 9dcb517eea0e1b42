use crate::error::{Error, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::Level;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "TASK_MANAGER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "task-manager.toml";
pub const ENV_PREFIX: &str = "TASK_MANAGER";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from the optional config file, then from
    /// `TASK_MANAGER_*` environment variables.
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_builder(
            config::Config::builder()
                .add_source(File::with_name(&file).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn log_level(&self) -> Result<Level> {
        self.log_level.parse().map_err(|_| {
            Error::Config(ConfigError::Message(format!(
                "invalid log level '{}', use trace, debug, info, warn or error",
                self.log_level
            )))
        })
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tasks.db")
}

fn default_log_level() -> String {
    "info".to_string()
}
