//! The customer-by-customer sales loop.

use tracing::{debug, trace};

use lemonstand_core::demand::DemandModel;
use lemonstand_core::production::StockOut;
use lemonstand_core::rng::RandomStream;
use lemonstand_core::stand::StandState;
use lemonstand_core::weather::Weather;

/// What happened at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesOutcome {
    pub customers: u32,
    pub units_sold: u32,
    pub stock_out: Option<StockOut>,
}

/// Draws today's traffic, then gives every customer in turn one purchase roll.
///
/// A failed serve closes the stand: no later customer rolls, so the stream
/// advances by exactly one draw per customer seen.
pub fn run_sales(
    state: &mut StandState,
    demand: &DemandModel,
    weather: &Weather,
    rng: &mut RandomStream,
) -> SalesOutcome {
    let customers = demand.customer_traffic(weather, rng);
    let probability = demand.buy_probability(state.price(), weather);
    debug!(customers, probability, "Opening for sales");

    let mut units_sold = 0;
    let mut stock_out = None;
    for customer in 0..customers {
        if rng.uniform(0.0, 1.0) >= probability {
            continue;
        }
        match state.serve_one() {
            Ok(()) => units_sold += 1,
            Err(reason) => {
                debug!(customer, %reason, units_sold, "Stock-out, closing early");
                stock_out = Some(reason);
                break;
            }
        }
        trace!(customer, units_sold, "Served customer");
    }

    SalesOutcome {
        customers,
        units_sold,
        stock_out,
    }
}
