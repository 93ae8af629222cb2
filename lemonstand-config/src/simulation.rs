//! Run parameters: seed, length, opening balance and overnight spoilage.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Seed for the random stream. Zero is remapped by the stream itself.
    #[serde(default = "default_seed")]
    pub seed: u32,

    /// Days to play.
    #[validate(range(min = 1, max = 36_500))]
    #[serde(default = "default_days")]
    pub days: u32,

    /// Opening balance in dollars.
    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    #[serde(default = "default_starting_cash")]
    pub starting_cash: f64,

    /// Price per unit before any plan has been settled.
    #[validate(range(exclusive_min = 0.0, max = 1_000.0))]
    #[serde(default = "default_starting_price")]
    pub starting_price: f64,

    /// Share of ice lost at close.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_spoilage_fraction")]
    pub spoilage_fraction: f64,
}

fn default_seed() -> u32 {
    42
}

fn default_days() -> u32 {
    30
}

fn default_starting_cash() -> f64 {
    20.0
}

fn default_starting_price() -> f64 {
    0.25
}

fn default_spoilage_fraction() -> f64 {
    1.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            days: default_days(),
            starting_cash: default_starting_cash(),
            starting_price: default_starting_price(),
            spoilage_fraction: default_spoilage_fraction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_simulation_config_is_valid() {
        SimulationConfig::default()
            .validate()
            .expect("Default config should be valid");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = SimulationConfig::default();
        config.spoilage_fraction = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.starting_price = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.starting_cash = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.days = 0;
        assert!(config.validate().is_err());
    }
}
