use std::path::Path;

use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_AMOUNT, DEFAULT_LOG_LEVEL, DEFAULT_TIMEZONE, ENV_PREFIX, MAX_AMOUNT,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// IANA zone name in which occurrences are computed.
    pub timezone: String,
    pub finder: FinderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinderConfig {
    pub default_amount: usize,
    pub max_amount: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional TOML file.
    /// Environment variables take precedence over file values.
    ///
    /// When `path` is `None`, `config.toml` in the working directory is used if present.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the resulting values fails.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("timezone", DEFAULT_TIMEZONE)?
            .set_default("finder.default_amount", DEFAULT_AMOUNT as u64)?
            .set_default("finder.max_amount", MAX_AMOUNT as u64)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks value ranges that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the finder amounts are inconsistent.
    pub fn validate(&self) -> CoreResult<()> {
        if self.finder.max_amount == 0 {
            return Err(CoreError::InvalidInput(
                "finder.max_amount must be at least 1".to_string(),
            ));
        }
        if self.finder.default_amount > self.finder.max_amount {
            return Err(CoreError::InvalidInput(format!(
                "finder.default_amount ({}) exceeds finder.max_amount ({})",
                self.finder.default_amount, self.finder.max_amount
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            finder: FinderConfig {
                default_amount: DEFAULT_AMOUNT,
                max_amount: MAX_AMOUNT,
            },
            logging: LoggingConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from a `.env` file, environment variables, and a TOML file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load(path)?;
    tracing::debug!(timezone = %settings.timezone, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
