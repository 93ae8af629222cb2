//! ## lemonstand-core::production
//! **Ingredient inventory and the batch state machine**
//!
//! A batch is either absent (`BatchState::Idle`) or in progress with a non-zero
//! number of servable units (`BatchState::Active`). Brewing is the only way into
//! `Active`; serving the last unit drops back to `Idle`. The batch survives the
//! night: spoilage only touches ice, so a leftover batch may still be served the
//! next day if enough ice is bought.

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::plan::Recipe;

/// Why a unit could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum StockOut {
    #[error("out of cups")]
    Cups,
    #[error("not enough ice for a unit")]
    Ice,
    #[error("not enough lemons or sugar to brew a batch")]
    Ingredients,
}

/// Lifecycle of the current batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BatchState {
    #[default]
    Idle,
    Active { remaining: u32 },
}

impl BatchState {
    pub fn remaining(&self) -> u32 {
        match self {
            BatchState::Idle => 0,
            BatchState::Active { remaining } => *remaining,
        }
    }
}

/// Raw ingredients on hand plus the batch in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionState {
    lemons: u32,
    sugar: u32,
    ice: u32,
    cups: u32,
    batch: BatchState,
}

impl ProductionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lemons(&self) -> u32 {
        self.lemons
    }

    pub fn sugar(&self) -> u32 {
        self.sugar
    }

    pub fn ice(&self) -> u32 {
        self.ice
    }

    pub fn cups(&self) -> u32 {
        self.cups
    }

    pub fn batch(&self) -> BatchState {
        self.batch
    }

    pub fn units_remaining(&self) -> u32 {
        self.batch.remaining()
    }

    /// Adds purchased stock. Saturates rather than wrapping at `u32::MAX`.
    pub fn add_supplies(&mut self, lemons: u32, sugar: u32, ice: u32, cups: u32) {
        self.lemons = self.lemons.saturating_add(lemons);
        self.sugar = self.sugar.saturating_add(sugar);
        self.ice = self.ice.saturating_add(ice);
        self.cups = self.cups.saturating_add(cups);
    }

    /// Brews a fresh batch if lemons and sugar allow. Leaves state untouched otherwise.
    pub fn try_brew_batch(&mut self, recipe: &Recipe) -> bool {
        if self.lemons < recipe.lemons_per_batch() || self.sugar < recipe.sugar_per_batch() {
            return false;
        }
        self.lemons -= recipe.lemons_per_batch();
        self.sugar -= recipe.sugar_per_batch();
        self.batch = BatchState::Active {
            remaining: recipe.units_per_batch(),
        };
        trace!(
            units = recipe.units_per_batch(),
            lemons_left = self.lemons,
            sugar_left = self.sugar,
            "Brewed batch"
        );
        true
    }

    /// Serves one unit, brewing first when no batch is active.
    ///
    /// Any failure leaves every count unchanged.
    pub fn serve_one(&mut self, recipe: &Recipe) -> Result<(), StockOut> {
        if self.cups == 0 {
            return Err(StockOut::Cups);
        }
        if self.ice < recipe.ice_per_unit() {
            return Err(StockOut::Ice);
        }
        if self.batch == BatchState::Idle && !self.try_brew_batch(recipe) {
            return Err(StockOut::Ingredients);
        }

        self.cups -= 1;
        self.ice -= recipe.ice_per_unit();
        self.batch = match self.batch.remaining() {
            0 | 1 => BatchState::Idle,
            n => BatchState::Active { remaining: n - 1 },
        };
        Ok(())
    }

    /// Melts `fraction` of the ice overnight; everything else keeps.
    pub fn apply_spoilage(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        let kept = (f64::from(self.ice) * (1.0 - fraction)).floor();
        self.ice = kept.max(0.0) as u32;
    }
}
