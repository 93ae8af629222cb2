//! Decision policies.
//!
//! A policy is called once per simulated day with a read-only view of the stand
//! and the day's conditions, and answers with a `DayPlan`. Anything a policy
//! remembers between days lives in the policy itself.

mod greedy;
mod random;

pub use greedy::GreedyPolicy;
pub use random::RandomPolicy;

use lemonstand_core::plan::DayPlan;
use lemonstand_core::pricing::PriceList;
use lemonstand_core::stand::StandState;
use lemonstand_core::weather::Weather;

pub trait DecisionPolicy {
    /// Chooses price, purchases and recipe for `day` (1-based).
    fn plan(
        &mut self,
        state: &StandState,
        weather: &Weather,
        prices: &PriceList,
        day: u32,
    ) -> DayPlan;
}

impl<F> DecisionPolicy for F
where
    F: FnMut(&StandState, &Weather, &PriceList, u32) -> DayPlan,
{
    fn plan(
        &mut self,
        state: &StandState,
        weather: &Weather,
        prices: &PriceList,
        day: u32,
    ) -> DayPlan {
        self(state, weather, prices, day)
    }
}
