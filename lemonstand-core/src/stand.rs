//! The `StandState` aggregate and the records it accumulates.

use serde::Serialize;
use tracing::debug;

use crate::error::SimulationError;
use crate::money::round_cents;
use crate::plan::{DayPlan, Recipe};
use crate::pricing::PriceList;
use crate::production::{ProductionState, StockOut};
use crate::rng::RandomStream;
use crate::weather::Weather;

/// Slack allowed when comparing an order's cost against cash on hand.
pub const SETTLEMENT_TOLERANCE: f64 = 1e-9;

/// Weather and prices a day is played under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayConditions {
    pub weather: Weather,
    pub prices: PriceList,
}

impl DayConditions {
    /// Draws the weather, then the prices.
    pub fn forecast(rng: &mut RandomStream) -> Self {
        let weather = Weather::forecast(rng);
        let prices = PriceList::generate(rng);
        Self { weather, prices }
    }
}

/// Stock left at close, after spoilage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Leftovers {
    pub lemons: u32,
    pub sugar: u32,
    pub ice: u32,
    pub cups: u32,
    pub units_in_batch: u32,
}

impl From<&ProductionState> for Leftovers {
    fn from(production: &ProductionState) -> Self {
        Self {
            lemons: production.lemons(),
            sugar: production.sugar(),
            ice: production.ice(),
            cups: production.cups(),
            units_in_batch: production.units_remaining(),
        }
    }
}

/// Immutable record of one committed day. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayResult {
    pub day: u32,
    pub weather: Weather,
    pub prices: PriceList,
    pub plan: DayPlan,
    pub customers: u32,
    pub units_sold: u32,
    pub gross_revenue: f64,
    pub supply_cost: f64,
    pub net_profit: f64,
    pub leftovers: Leftovers,
    /// Set when the sales loop ended early on a failed serve.
    pub stock_out: Option<StockOut>,
}

/// Running totals over the whole history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub days: u32,
    pub customers: u64,
    pub units_sold: u64,
    pub gross_revenue: f64,
    pub supply_cost: f64,
    pub net_profit: f64,
    pub stock_out_days: u32,
    pub cash: f64,
}

/// Aggregate root: cash, the adopted recipe and price, inventory and history.
///
/// Policies only ever see `&StandState`. The mutating methods are the engine's
/// hooks into the day sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandState {
    cash: f64,
    recipe: Recipe,
    price: f64,
    production: ProductionState,
    history: Vec<DayResult>,
}

impl StandState {
    pub fn new(starting_cash: f64, recipe: Recipe, price: f64) -> Self {
        Self {
            cash: starting_cash,
            recipe,
            price,
            production: ProductionState::new(),
            history: Vec::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn production(&self) -> &ProductionState {
        &self.production
    }

    pub fn history(&self) -> &[DayResult] {
        &self.history
    }

    /// Index of the day that would be played next, starting at 1.
    pub fn next_day(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    /// Pays for the plan's order and adopts its price and recipe.
    ///
    /// Returns the cost paid. On `InsufficientFunds` nothing has changed.
    pub fn settle(
        &mut self,
        day: u32,
        plan: &DayPlan,
        prices: &PriceList,
    ) -> Result<f64, SimulationError> {
        let order = plan.order();
        let cost = order.cost(prices);
        if cost > self.cash + SETTLEMENT_TOLERANCE {
            return Err(SimulationError::InsufficientFunds {
                day,
                required: cost,
                available: self.cash,
            });
        }

        self.cash = (self.cash - cost).max(0.0);
        self.production
            .add_supplies(order.lemons, order.sugar, order.ice, order.cups);
        self.price = plan.price();
        self.recipe = *plan.recipe();
        debug!(day, cost, cash = self.cash, "Settled purchase order");
        Ok(cost)
    }

    /// Serves one unit with the adopted recipe.
    pub fn serve_one(&mut self) -> Result<(), StockOut> {
        self.production.serve_one(&self.recipe)
    }

    /// Banks the day's takings at the adopted price and spoils ice. Returns the revenue.
    pub fn close_day(&mut self, units_sold: u32, spoilage_fraction: f64) -> f64 {
        let revenue = f64::from(units_sold) * self.price;
        self.cash += revenue;
        self.production.apply_spoilage(spoilage_fraction);
        revenue
    }

    pub fn leftovers(&self) -> Leftovers {
        Leftovers::from(&self.production)
    }

    /// Appends a committed day to the history.
    pub fn record(&mut self, result: DayResult) {
        self.history.push(result);
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = self.history.iter().fold(RunSummary::default(), |mut acc, day| {
            acc.days += 1;
            acc.customers += u64::from(day.customers);
            acc.units_sold += u64::from(day.units_sold);
            acc.gross_revenue += day.gross_revenue;
            acc.supply_cost += day.supply_cost;
            acc.net_profit += day.net_profit;
            acc.stock_out_days += u32::from(day.stock_out.is_some());
            acc
        });
        summary.gross_revenue = round_cents(summary.gross_revenue);
        summary.supply_cost = round_cents(summary.supply_cost);
        summary.net_profit = round_cents(summary.net_profit);
        summary.cash = round_cents(self.cash);
        summary
    }
}
