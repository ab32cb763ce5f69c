//! Application configuration

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;

use crate::errors::GeneratorError;

/// Seller key owning all seeded availability.
pub const ADMIN_KEY: &str = "5Jo2U83td6MGcLWvCAshKhrcrKmrXcnsiqD8x7M3batEhWapzow";

const CONFIG_FILE: &str = "config/default";
const ENV_PREFIX: &str = "PARKINGGEN";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub num_zones: u32,
    pub spots_per_zone: u32,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub slot_size: Duration,
    /// Calendar days after the current moment where the window ends
    pub horizon_days: u64,
    pub seller_key: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_zones: 8,
            spots_per_zone: 5,
            slot_size: Duration::from_secs(15 * 60),
            horizon_days: 14,
            seller_key: ADMIN_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Load defaults, then `config/default.*`, then `PARKINGGEN__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(CONFIG_FILE, ENV_PREFIX)
    }

    fn from_sources(file_name: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = GeneratorConfig::default();

        let config = Config::builder()
            .set_default("generator.num_zones", i64::from(defaults.num_zones))?
            .set_default(
                "generator.spots_per_zone",
                i64::from(defaults.spots_per_zone),
            )?
            .set_default(
                "generator.slot_size",
                defaults.slot_size.as_secs() as i64,
            )?
            .set_default("generator.horizon_days", defaults.horizon_days as i64)?
            .set_default("generator.seller_key", defaults.seller_key)?
            .add_source(File::with_name(file_name).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl GeneratorConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_zones == 0 {
            return Err(GeneratorError::ConfigurationError {
                message: "Number of zones must be greater than zero".to_string(),
            });
        }
        if self.spots_per_zone == 0 {
            return Err(GeneratorError::ConfigurationError {
                message: "Spots per zone must be greater than zero".to_string(),
            });
        }
        if self.slot_size.as_secs() == 0 {
            return Err(GeneratorError::ConfigurationError {
                message: "Slot size must be at least one second".to_string(),
            });
        }
        if i64::try_from(self.slot_size.as_secs()).is_err() {
            return Err(GeneratorError::ConfigurationError {
                message: format!("Slot size must be at most {} seconds", i64::MAX),
            });
        }
        Ok(())
    }

    /// Slot size in whole seconds
    pub fn slot_seconds(&self) -> i64 {
        i64::try_from(self.slot_size.as_secs()).unwrap_or(i64::MAX)
    }
}
