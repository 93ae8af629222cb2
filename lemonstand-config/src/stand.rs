//! Recipe and demand parameters, and their conversion into core types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use lemonstand_core::demand::DemandModel;
use lemonstand_core::plan::Recipe;
use lemonstand_core::PlanError;

/// Opening recipe. Plans may replace it from day one.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct RecipeConfig {
    #[serde(default = "default_lemons")]
    pub lemons_per_batch: u32,

    #[serde(default = "default_sugar")]
    pub sugar_per_batch: u32,

    #[serde(default = "default_ice")]
    pub ice_per_unit: u32,

    #[validate(range(min = 1))]
    #[serde(default = "default_units")]
    pub units_per_batch: u32,
}

fn default_lemons() -> u32 {
    6
}
fn default_sugar() -> u32 {
    4
}
fn default_ice() -> u32 {
    4
}
fn default_units() -> u32 {
    12
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            lemons_per_batch: default_lemons(),
            sugar_per_batch: default_sugar(),
            ice_per_unit: default_ice(),
            units_per_batch: default_units(),
        }
    }
}

impl RecipeConfig {
    pub fn to_recipe(&self) -> Result<Recipe, PlanError> {
        Recipe::new(
            self.lemons_per_batch,
            self.sugar_per_batch,
            self.ice_per_unit,
            self.units_per_batch,
        )
    }
}

/// Customer traffic and price sensitivity.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct DemandConfig {
    #[validate(range(min = 0.0, max = 100_000.0))]
    #[serde(default = "default_base_traffic")]
    pub base_traffic: f64,

    #[validate(range(min = 0.0, max = 100_000.0))]
    #[serde(default = "default_traffic_stdev")]
    pub traffic_stdev: f64,

    #[validate(range(exclusive_min = 0.0, max = 1_000.0))]
    #[serde(default = "default_reference_price")]
    pub reference_price: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "default_elasticity")]
    pub elasticity: f64,
}

fn default_base_traffic() -> f64 {
    DemandModel::default().base_traffic
}
fn default_traffic_stdev() -> f64 {
    DemandModel::default().traffic_stdev
}
fn default_reference_price() -> f64 {
    DemandModel::default().reference_price
}
fn default_elasticity() -> f64 {
    DemandModel::default().elasticity
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            base_traffic: default_base_traffic(),
            traffic_stdev: default_traffic_stdev(),
            reference_price: default_reference_price(),
            elasticity: default_elasticity(),
        }
    }
}

impl From<&DemandConfig> for DemandModel {
    fn from(config: &DemandConfig) -> Self {
        Self {
            base_traffic: config.base_traffic,
            traffic_stdev: config.traffic_stdev,
            reference_price: config.reference_price,
            elasticity: config.elasticity,
        }
    }
}
