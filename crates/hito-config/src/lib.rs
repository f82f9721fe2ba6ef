//! # hito-config
//!
//! Layered configuration loading for Hitos using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HITOS_*` prefix, `__` as separator)
//! 2. Project-level `.hitos/config.toml`
//! 3. User-level `~/.config/hitos/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HITOS_GENERAL__PAGE_SIZE` -> `general.page_size`,
//! `HITOS_IDENTITY__USERNAME` -> `identity.username`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use hito_config::HitosConfig;
//!
//! let config = HitosConfig::load_with_dotenv().expect("config");
//! println!("snapshot at {}", config.store.snapshot_path);
//! ```

mod error;
mod general;
mod identity;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use identity::IdentityConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HitosConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl HitosConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".hitos/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("HITOS_").split("__"))
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page size or an empty snapshot path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.store.snapshot_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.snapshot_path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hitos").join("config.toml"))
    }
}
