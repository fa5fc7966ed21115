//! Configuration file support for boostcalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/boostcalc/config.toml`.
//! It only supplies defaults; calculations never write it.

use crate::{Error, Result, Scenario};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scenario: ScenarioConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Default scenario values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_interaction_xp")]
    pub interaction_xp: u64,

    #[serde(default = "default_base_timer")]
    pub base_timer: f64,

    #[serde(default = "default_base_level")]
    pub base_level: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            interaction_xp: default_interaction_xp(),
            base_timer: default_base_timer(),
            base_level: default_base_level(),
        }
    }
}

/// Input guards applied at the boundary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted amount for every tier except Dragon
    #[serde(default = "default_tier_amount_cap")]
    pub tier_amount_cap: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            tier_amount_cap: default_tier_amount_cap(),
        }
    }
}

// Default value functions
fn default_interaction_xp() -> u64 {
    10
}

fn default_base_timer() -> f64 {
    2.4
}

fn default_base_level() -> u32 {
    10
}

fn default_tier_amount_cap() -> u64 {
    10_000
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| Error::Config("Unable to determine config directory".into()))?;
        Ok(base.join("boostcalc").join("config.toml"))
    }

    /// Save the configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject defaults that would fail boundary validation
    pub fn validate(&self) -> Result<()> {
        self.default_scenario()
            .validate()
            .map_err(|e| Error::Config(format!("Invalid [scenario] defaults: {}", e)))?;
        if self.limits.tier_amount_cap == 0 {
            return Err(Error::Config(
                "limits.tier_amount_cap must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The scenario built from configured defaults
    pub fn default_scenario(&self) -> Scenario {
        Scenario {
            interaction_xp: self.scenario.interaction_xp,
            base_timer: self.scenario.base_timer,
            base_level: self.scenario.base_level,
        }
    }
}
