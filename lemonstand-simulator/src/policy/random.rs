//! Seeded random policy for fuzzing.
//!
//! Draws from its own `SmallRng`, never from the engine's stream, so plugging it
//! in does not disturb the weather or sales sequence. Orders are deliberately
//! unconstrained by cash to exercise the settlement rejection path.

use std::num::NonZeroU32;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lemonstand_core::plan::{DayPlan, PurchaseOrder, Recipe};
use lemonstand_core::pricing::PriceList;
use lemonstand_core::stand::StandState;
use lemonstand_core::weather::Weather;

use super::DecisionPolicy;

#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: SmallRng,
    recipe_change_probability: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            recipe_change_probability: 0.2,
        }
    }

    fn random_recipe(&mut self, current: &Recipe) -> Recipe {
        Recipe::new(
            self.rng.random_range(0..=8),
            self.rng.random_range(0..=8),
            self.rng.random_range(0..=6),
            self.rng.random_range(1..=20),
        )
        .unwrap_or(*current)
    }
}

impl DecisionPolicy for RandomPolicy {
    fn plan(
        &mut self,
        state: &StandState,
        _weather: &Weather,
        _prices: &PriceList,
        _day: u32,
    ) -> DayPlan {
        let recipe = if self.rng.random_bool(self.recipe_change_probability) {
            self.random_recipe(state.recipe())
        } else {
            *state.recipe()
        };
        let order = PurchaseOrder::new(
            self.rng.random_range(0..=24),
            self.rng.random_range(0..=16),
            self.rng.random_range(0..=400),
            self.rng.random_range(0..=100),
        );
        let cents = NonZeroU32::new(self.rng.random_range(5..=80)).unwrap_or(NonZeroU32::MIN);
        DayPlan::from_cents(cents, order, recipe)
    }
}
