//! Expected-profit policy.
//!
//! Scores every price on a fixed grid against noise-free traffic, keeps the most
//! profitable one, and buys just enough stock for the units it expects to sell,
//! trimmed until the order fits in the cash box.

use std::num::NonZeroU32;

use tracing::trace;

use lemonstand_core::demand::DemandModel;
use lemonstand_core::plan::{DayPlan, PurchaseOrder, Recipe};
use lemonstand_core::pricing::PriceList;
use lemonstand_core::production::ProductionState;
use lemonstand_core::stand::StandState;
use lemonstand_core::weather::Weather;

use super::DecisionPolicy;

const DEFAULT_GRID_CENTS: [u32; 9] = [10, 15, 20, 25, 30, 35, 40, 45, 50];

#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    demand: DemandModel,
    recipe: Recipe,
    price_grid: Vec<NonZeroU32>,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new(DemandModel::default(), Recipe::default())
    }
}

impl GreedyPolicy {
    pub fn new(demand: DemandModel, recipe: Recipe) -> Self {
        Self {
            demand,
            recipe,
            price_grid: DEFAULT_GRID_CENTS
                .iter()
                .filter_map(|&cents| NonZeroU32::new(cents))
                .collect(),
        }
    }

    /// Replaces the candidate prices. Zero entries are dropped.
    #[cfg(test)]
    fn with_price_grid(mut self, cents: &[u32]) -> Self {
        let grid: Vec<NonZeroU32> = cents.iter().filter_map(|&c| NonZeroU32::new(c)).collect();
        if !grid.is_empty() {
            self.price_grid = grid;
        }
        self
    }

    /// Units the stand expects to sell at `price` if stock never runs out.
    fn expected_units(&self, price: f64, weather: &Weather) -> u32 {
        let traffic = self.demand.expected_traffic(weather);
        let buyers = traffic * self.demand.buy_probability(price, weather);
        buyers.floor().max(0.0) as u32
    }

    /// Best grid price and the units expected at it; ties keep the lower price.
    fn choose_price(&self, weather: &Weather, prices: &PriceList) -> (NonZeroU32, u32) {
        let unit_cost = self.recipe.unit_cost(prices);
        let mut best: Option<(NonZeroU32, u32, f64)> = None;
        for &cents in &self.price_grid {
            let price = f64::from(cents.get()) / 100.0;
            let units = self.expected_units(price, weather);
            let profit = f64::from(units) * (price - unit_cost);
            trace!(price, units, profit, "Scored candidate price");
            if best.map_or(true, |(_, _, top)| profit > top) {
                best = Some((cents, units, profit));
            }
        }
        match best {
            Some((cents, units, _)) => (cents, units),
            None => (NonZeroU32::MIN, 0),
        }
    }
}

/// Ingredients missing from `stock` to serve `target` units with `recipe`.
fn order_for(target: u32, stock: &ProductionState, recipe: &Recipe) -> PurchaseOrder {
    let cups = target.saturating_sub(stock.cups());
    let ice = target
        .saturating_mul(recipe.ice_per_unit())
        .saturating_sub(stock.ice());
    let to_brew = target.saturating_sub(stock.units_remaining());
    let batches = to_brew.div_ceil(recipe.units_per_batch());
    let lemons = batches
        .saturating_mul(recipe.lemons_per_batch())
        .saturating_sub(stock.lemons());
    let sugar = batches
        .saturating_mul(recipe.sugar_per_batch())
        .saturating_sub(stock.sugar());
    PurchaseOrder::new(lemons, sugar, ice, cups)
}

impl DecisionPolicy for GreedyPolicy {
    fn plan(
        &mut self,
        state: &StandState,
        weather: &Weather,
        prices: &PriceList,
        _day: u32,
    ) -> DayPlan {
        let (cents, expected) = self.choose_price(weather, prices);

        let mut target = expected;
        let mut order = order_for(target, state.production(), &self.recipe);
        while target > 0 && order.cost(prices) > state.cash() {
            target -= 1;
            order = order_for(target, state.production(), &self.recipe);
        }

        DayPlan::from_cents(cents, order, self.recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonstand_core::weather::WeatherKind;

    fn prices() -> PriceList {
        PriceList::baseline()
    }

    #[test]
    fn test_order_for_empty_stock() {
        let order = order_for(13, &ProductionState::new(), &Recipe::default());
        assert_eq!(order, PurchaseOrder::new(12, 8, 52, 13));
    }

    #[test]
    fn test_order_for_uses_leftovers() {
        // An 11-unit leftover batch and spare cups leave only ice to buy.
        let mut brewed = ProductionState::new();
        brewed.add_supplies(6, 4, 4, 20);
        brewed.serve_one(&Recipe::default()).unwrap();
        let order = order_for(11, &brewed, &Recipe::default());
        assert_eq!(order, PurchaseOrder::new(0, 0, 44, 0));
    }

    #[test]
    fn test_plan_fits_cash() {
        let mut policy = GreedyPolicy::default();
        let weather = Weather::new(WeatherKind::Hot, 95);
        for cash in [0.0, 0.5, 2.0, 10.0, 100.0] {
            let stand = StandState::new(cash, Recipe::default(), 0.25);
            let plan = policy.plan(&stand, &weather, &prices(), 1);
            assert!(plan.order().cost(&prices()) <= cash + 1e-9);
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        let mut a = GreedyPolicy::default();
        let mut b = GreedyPolicy::default();
        let stand = StandState::new(20.0, Recipe::default(), 0.25);
        let weather = Weather::new(WeatherKind::Mild, 78);
        assert_eq!(
            a.plan(&stand, &weather, &prices(), 1),
            b.plan(&stand, &weather, &prices(), 1)
        );
    }

    #[test]
    fn test_hot_days_stock_more_than_storms() {
        let mut policy = GreedyPolicy::default();
        let stand = StandState::new(50.0, Recipe::default(), 0.25);
        let hot = policy.plan(&stand, &Weather::new(WeatherKind::Hot, 95), &prices(), 1);
        let storm = policy.plan(&stand, &Weather::new(WeatherKind::Storm, 70), &prices(), 1);
        assert!(hot.order().cups > storm.order().cups);
    }

    #[test]
    fn test_custom_grid_ignores_zero() {
        let policy = GreedyPolicy::default().with_price_grid(&[0, 30]);
        let (cents, _) = policy.choose_price(&Weather::new(WeatherKind::Mild, 75), &prices());
        assert_eq!(cents.get(), 30);
    }
}
