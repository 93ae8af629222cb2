// lemonstand-simulator/src/lib.rs

/*!
# Lemonstand Simulator

Deterministic day-by-day simulation of a lemonade stand.

## Key Components:
- **Simulation Engine:** runs the fixed day sequence (forecast, prices, plan,
  settlement, sales, spoilage, record) against a `StandState`.
- **Sales Loop:** customer-by-customer purchase rolls that stop at the first stock-out.
- **Policies:** the `DecisionPolicy` trait plus greedy and random implementations.
- **Fingerprint:** BLAKE3 digest of the committed history for reproducibility checks.

A single `RandomStream` feeds every draw. Given the same seed and policy, two
engines produce identical histories and identical fingerprints.
*/

use blake3::Hasher;
use tracing::{debug, info, instrument, warn};

use lemonstand_core::demand::DemandModel;
use lemonstand_core::money::round_cents;
use lemonstand_core::plan::DayPlan;
use lemonstand_core::rng::RandomStream;
use lemonstand_core::stand::{DayConditions, DayResult, StandState};
use lemonstand_core::SimulationError;

pub mod fingerprint;
pub mod policy;
pub mod sales;

pub use policy::{DecisionPolicy, GreedyPolicy, RandomPolicy};
pub use sales::SalesOutcome;

/// Fraction of ice lost overnight unless configured otherwise.
pub const DEFAULT_SPOILAGE_FRACTION: f64 = 1.0;

/// Owns the stand and the random stream and is the only writer to either.
///
/// # Fields
/// - `rng`: the single stream behind weather, prices, traffic and purchase rolls.
/// - `demand`: traffic and elasticity parameters.
/// - `state`: cash, inventory, adopted recipe and price, history.
/// - `spoilage_fraction`: share of ice that melts at close.
/// - `state_hasher`: running BLAKE3 digest of committed days.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    rng: RandomStream,
    demand: DemandModel,
    state: StandState,
    spoilage_fraction: f64,
    state_hasher: Hasher,
}

impl SimulationEngine {
    /// Creates an engine around `state`.
    ///
    /// * `seed` - Seed for the random stream.
    /// * `state` - Starting cash, recipe and price; usually with an empty history.
    pub fn new(seed: u32, state: StandState) -> Self {
        let mut state_hasher = Hasher::new();
        for day in state.history() {
            fingerprint::hash_day(&mut state_hasher, day);
        }
        Self {
            rng: RandomStream::new(seed),
            demand: DemandModel::default(),
            state,
            spoilage_fraction: DEFAULT_SPOILAGE_FRACTION,
            state_hasher,
        }
    }

    pub fn with_demand_model(mut self, demand: DemandModel) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the overnight ice loss; clamped to [0, 1].
    pub fn with_spoilage_fraction(mut self, fraction: f64) -> Self {
        self.spoilage_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn state(&self) -> &StandState {
        &self.state
    }

    pub fn demand_model(&self) -> &DemandModel {
        &self.demand
    }

    /// Hex digest of every committed day so far.
    pub fn fingerprint(&self) -> String {
        hex::encode(self.state_hasher.finalize().as_bytes())
    }

    /// Draws the next day's weather and prices.
    ///
    /// Meant for front ends that show the forecast before asking for a plan, then
    /// pin it through [`SimulationEngine::run_manual_day`]. Each call consumes draws.
    pub fn forecast_next(&mut self) -> DayConditions {
        DayConditions::forecast(&mut self.rng)
    }

    /// Plays `days` consecutive days with `policy`, returning the days committed by
    /// this call. Stops at the first settlement failure; earlier days stay committed.
    #[instrument(skip(self, policy))]
    pub fn run_days<P>(
        &mut self,
        days: u32,
        policy: &mut P,
    ) -> Result<&[DayResult], SimulationError>
    where
        P: DecisionPolicy + ?Sized,
    {
        let start = self.state.history().len();
        for _ in 0..days {
            self.run_day(policy)?;
        }
        Ok(&self.state.history()[start..])
    }

    /// Plays one day: forecast, prices, then the policy's plan.
    pub fn run_day<P>(&mut self, policy: &mut P) -> Result<&DayResult, SimulationError>
    where
        P: DecisionPolicy + ?Sized,
    {
        let day = self.state.next_day();
        let conditions = self.forecast_next();
        let plan = policy.plan(&self.state, &conditions.weather, &conditions.prices, day);
        self.play_day(day, conditions, plan)
    }

    /// Plays one day from an externally supplied plan.
    ///
    /// With `conditions` pinned the forecast draws are skipped, so a rejected day
    /// can be resubmitted under the same weather and prices.
    #[instrument(skip(self, plan, conditions), fields(pinned = conditions.is_some()))]
    pub fn run_manual_day(
        &mut self,
        plan: DayPlan,
        conditions: Option<DayConditions>,
    ) -> Result<&DayResult, SimulationError> {
        let day = self.state.next_day();
        let conditions = match conditions {
            Some(conditions) => conditions,
            None => self.forecast_next(),
        };
        self.play_day(day, conditions, plan)
    }

    /// Settlement through record. Nothing is mutated unless settlement succeeds.
    fn play_day(
        &mut self,
        day: u32,
        conditions: DayConditions,
        plan: DayPlan,
    ) -> Result<&DayResult, SimulationError> {
        let DayConditions { weather, prices } = conditions;
        debug!(day, %weather, %prices, "Starting day");

        let supply_cost = self.state.settle(day, &plan, &prices).inspect_err(|e| {
            warn!(day, error = %e, "Settlement rejected");
        })?;

        let sales = sales::run_sales(&mut self.state, &self.demand, &weather, &mut self.rng);
        let gross_revenue = self.state.close_day(sales.units_sold, self.spoilage_fraction);

        let result = DayResult {
            day,
            weather,
            prices,
            plan,
            customers: sales.customers,
            units_sold: sales.units_sold,
            gross_revenue: round_cents(gross_revenue),
            supply_cost: round_cents(supply_cost),
            net_profit: round_cents(gross_revenue - supply_cost),
            leftovers: self.state.leftovers(),
            stock_out: sales.stock_out,
        };
        fingerprint::hash_day(&mut self.state_hasher, &result);
        info!(
            day,
            customers = result.customers,
            units_sold = result.units_sold,
            revenue = result.gross_revenue,
            profit = result.net_profit,
            cash = self.state.cash(),
            "Day closed"
        );

        self.state.record(result);
        let index = self.state.history().len() - 1;
        Ok(&self.state.history()[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonstand_core::plan::{PurchaseOrder, Recipe};
    use lemonstand_core::pricing::PriceList;
    use lemonstand_core::weather::{Weather, WeatherKind};
    use tracing_test::traced_test;

    fn engine(seed: u32, cash: f64) -> SimulationEngine {
        SimulationEngine::new(seed, StandState::new(cash, Recipe::default(), 0.25))
    }

    #[test]
    fn test_run_days_appends_history() {
        let mut engine = engine(42, 20.0);
        let committed = engine.run_days(5, &mut GreedyPolicy::default()).unwrap();
        assert_eq!(committed.len(), 5);
        let days: Vec<u32> = engine.state().history().iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_fingerprint_matches_history() {
        let mut engine = engine(7, 15.0);
        engine.run_days(10, &mut GreedyPolicy::default()).unwrap();
        assert_eq!(
            engine.fingerprint(),
            fingerprint::history_fingerprint(engine.state().history())
        );
    }

    #[test]
    fn test_closure_policy() {
        let mut engine = engine(3, 10.0);
        let mut calls = Vec::new();
        let mut policy = |state: &StandState, _: &Weather, _: &PriceList, day: u32| {
            calls.push(day);
            DayPlan::new(0.30, PurchaseOrder::default(), *state.recipe()).unwrap()
        };
        engine.run_days(3, &mut policy).unwrap();
        assert_eq!(calls, vec![1, 2, 3]);
        assert_eq!(engine.state().cash(), 10.0);
    }

    #[test]
    fn test_pinned_conditions_are_used() {
        let mut engine = engine(11, 10.0);
        let conditions = engine.forecast_next();
        let plan = DayPlan::new(0.25, PurchaseOrder::default(), Recipe::default()).unwrap();
        let result = engine.run_manual_day(plan, Some(conditions)).unwrap();
        assert_eq!(result.weather, conditions.weather);
        assert_eq!(result.prices, conditions.prices);
    }

    #[test]
    fn test_spoilage_fraction_is_clamped() {
        let mut engine = engine(5, 10.0).with_spoilage_fraction(0.0);
        let conditions = DayConditions {
            weather: Weather::new(WeatherKind::Storm, 70),
            prices: PriceList::baseline(),
        };
        let plan = DayPlan::new(5.0, PurchaseOrder::new(0, 0, 40, 0), Recipe::default()).unwrap();
        let result = engine.run_manual_day(plan, Some(conditions)).unwrap();
        assert_eq!(result.leftovers.ice, 40);

        let engine = engine.with_spoilage_fraction(7.5);
        assert_eq!(engine.spoilage_fraction, 1.0);
    }

    #[traced_test]
    #[test]
    fn test_rejected_settlement_is_logged() {
        let mut engine = engine(1, 0.0);
        let plan = DayPlan::new(0.25, PurchaseOrder::new(1, 0, 0, 0), Recipe::default()).unwrap();
        assert!(engine.run_manual_day(plan, None).is_err());
        assert!(logs_contain("Settlement rejected"));
    }
}
