//! Recipes, purchase orders and the per-day plan a policy hands to the engine.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::error::PlanError;
use crate::pricing::PriceList;

/// Ingredient ratios for brewing. Effective for one day's production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    lemons_per_batch: u32,
    sugar_per_batch: u32,
    ice_per_unit: u32,
    units_per_batch: u32,
}

impl Recipe {
    pub fn new(
        lemons_per_batch: u32,
        sugar_per_batch: u32,
        ice_per_unit: u32,
        units_per_batch: u32,
    ) -> Result<Self, PlanError> {
        if units_per_batch == 0 {
            return Err(PlanError::ZeroYield);
        }
        Ok(Self {
            lemons_per_batch,
            sugar_per_batch,
            ice_per_unit,
            units_per_batch,
        })
    }

    pub fn lemons_per_batch(&self) -> u32 {
        self.lemons_per_batch
    }

    pub fn sugar_per_batch(&self) -> u32 {
        self.sugar_per_batch
    }

    pub fn ice_per_unit(&self) -> u32 {
        self.ice_per_unit
    }

    pub fn units_per_batch(&self) -> u32 {
        self.units_per_batch
    }

    /// Ingredient cost of a single served unit at `prices`, batch cost spread over the yield.
    pub fn unit_cost(&self, prices: &PriceList) -> f64 {
        let batch = f64::from(self.lemons_per_batch) * prices.lemon
            + f64::from(self.sugar_per_batch) * prices.sugar;
        batch / f64::from(self.units_per_batch)
            + f64::from(self.ice_per_unit) * prices.ice
            + prices.cup
    }
}

impl Default for Recipe {
    /// 6 lemons and 4 sugar per 12-unit batch, 4 ice per unit.
    fn default() -> Self {
        Self {
            lemons_per_batch: 6,
            sugar_per_batch: 4,
            ice_per_unit: 4,
            units_per_batch: 12,
        }
    }
}

/// Quantities of each ingredient to buy before opening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseOrder {
    pub lemons: u32,
    pub sugar: u32,
    pub ice: u32,
    pub cups: u32,
}

impl PurchaseOrder {
    pub fn new(lemons: u32, sugar: u32, ice: u32, cups: u32) -> Self {
        Self {
            lemons,
            sugar,
            ice,
            cups,
        }
    }

    /// Order total at `prices`.
    pub fn cost(&self, prices: &PriceList) -> f64 {
        f64::from(self.lemons) * prices.lemon
            + f64::from(self.sugar) * prices.sugar
            + f64::from(self.ice) * prices.ice
            + f64::from(self.cups) * prices.cup
    }
}

/// Price, purchases and recipe for one day. Consumed once by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayPlan {
    price: f64,
    order: PurchaseOrder,
    recipe: Recipe,
}

impl DayPlan {
    pub fn new(price: f64, order: PurchaseOrder, recipe: Recipe) -> Result<Self, PlanError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(PlanError::InvalidPrice(price));
        }
        Ok(Self {
            price,
            order,
            recipe,
        })
    }

    /// Builds a plan from a whole-cent price, which is positive by construction.
    pub fn from_cents(cents: NonZeroU32, order: PurchaseOrder, recipe: Recipe) -> Self {
        Self {
            price: f64::from(cents.get()) / 100.0,
            order,
            recipe,
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn order(&self) -> &PurchaseOrder {
        &self.order
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Same price and recipe with nothing purchased.
    pub fn without_purchases(&self) -> Self {
        Self {
            order: PurchaseOrder::default(),
            ..*self
        }
    }
}
