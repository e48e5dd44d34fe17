//! # chem-config
//!
//! Layered configuration loading for CyberChem Lab using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CYBERCHEM_*` prefix, `__` as separator)
//! 2. Project-level `.cyberchem/config.toml`
//! 3. User-level `~/.config/cyberchem/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CYBERCHEM_API__BASE_URL` -> `api.base_url`,
//! `CYBERCHEM_LEADERBOARD__BACKEND` -> `leaderboard.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use chem_config::LabConfig;
//!
//! let config = LabConfig::load().expect("config");
//! println!("backend: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod leaderboard;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use leaderboard::{LeaderboardBackend, LeaderboardConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all overrides.
pub const ENV_PREFIX: &str = "CYBERCHEM_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LabConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl LabConfig {
    /// Load and validate configuration from all sources (TOML files +
    /// environment variables).
    ///
    /// Reads the process environment as it is; loading a `.env` file is the
    /// binary's job.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an arbitrary figment. Lets tests and callers
    /// stack extra providers on top of [`Self::figment`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".cyberchem/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.leaderboard.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cyberchem").join("config.toml"))
    }
}
