//! # Lemonstand Configuration
//!
//! Layered configuration for a simulation run.
//!
//! Hierarchy, later layers overriding earlier ones:
//! 1. Built-in defaults
//! 2. `config/lemonstand.yaml`
//! 3. `config/<LEMONSTAND_ENV>.yaml` (`LEMONSTAND_ENV` defaults to `default`)
//! 4. `LEMONSTAND_*` environment variables, `__` separating nested keys
//!    (e.g. `LEMONSTAND_SIMULATION__SEED=7`)

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use lemonstand_core::stand::StandState;

mod error;
mod simulation;
mod stand;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use simulation::SimulationConfig;
pub use stand::{DemandConfig, RecipeConfig};
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/lemonstand.yaml";
const ENV_PREFIX: &str = "LEMONSTAND_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct StandConfig {
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[validate(nested)]
    #[serde(default)]
    pub recipe: RecipeConfig,

    #[validate(nested)]
    #[serde(default)]
    pub demand: DemandConfig,

    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl StandConfig {
    /// Load configuration from the default files and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(StandConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{BASE_FILE} not found, using default configuration");
        }

        let env = std::env::var("LEMONSTAND_ENV").unwrap_or_else(|_| "default".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific file, still honouring the environment.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment =
            Figment::from(Serialized::defaults(StandConfig::default())).merge(Yaml::file(path));
        Self::finish(figment)
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Opening state of the stand: cash, recipe and price, empty inventory.
    pub fn starting_state(&self) -> Result<StandState, ConfigError> {
        let recipe = self.recipe.to_recipe()?;
        Ok(StandState::new(
            self.simulation.starting_cash,
            recipe,
            self.simulation.starting_price,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn full_config_validation() {
        let config = StandConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = StandConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, StandConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_environment_override() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/lemonstand.yaml",
                "simulation:\n  seed: 7\n  days: 10\nrecipe:\n  units_per_batch: 8\n",
            )?;
            jail.create_file("config/staging.yaml", "simulation:\n  days: 14\n")?;
            jail.set_env("LEMONSTAND_ENV", "staging");
            jail.set_env("LEMONSTAND_SIMULATION__SEED", "99");

            let config = StandConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.simulation.seed, 99);
            assert_eq!(config.simulation.days, 14);
            assert_eq!(config.recipe.units_per_batch, 8);
            assert_eq!(config.recipe.lemons_per_batch, 6);
            Ok(())
        });
    }

    #[test]
    fn invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("stand.yaml", "simulation:\n  spoilage_fraction: 2.0\n")?;
            let err = StandConfig::load_from_path("stand.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("spoilage_fraction"));
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_reported() {
        let err = StandConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn starting_state_uses_configured_values() {
        let mut config = StandConfig::default();
        config.simulation.starting_cash = 12.5;
        config.simulation.starting_price = 0.4;
        config.recipe.units_per_batch = 10;
        let state = config.starting_state().unwrap();
        assert_eq!(state.cash(), 12.5);
        assert_eq!(state.price(), 0.4);
        assert_eq!(state.recipe().units_per_batch(), 10);
        assert!(state.history().is_empty());
    }
}
