//! # lemonstand-core
//!
//! Domain model for the lemonade stand simulation.
//!
//! ### Key Submodules:
//! - `rng`: `RandomStream`, the single seeded source of randomness
//! - `weather`: daily weather categories and forecasting
//! - `pricing`: daily ingredient price lists
//! - `plan`: recipes, purchase orders and day plans
//! - `production`: ingredient inventory and the batch state machine
//! - `demand`: customer traffic and price elasticity
//! - `stand`: the `StandState` aggregate, day results and running totals
//!
//! Everything here is synchronous and single-threaded. Anything random takes a
//! `&mut RandomStream` so that the draw order stays explicit at every call site.

pub mod demand;
pub mod error;
pub mod money;
pub mod plan;
pub mod pricing;
pub mod production;
pub mod rng;
pub mod stand;
pub mod weather;

pub mod prelude {
    pub use crate::demand::*;
    pub use crate::error::*;
    pub use crate::plan::*;
    pub use crate::pricing::*;
    pub use crate::production::*;
    pub use crate::rng::*;
    pub use crate::stand::*;
    pub use crate::weather::*;
}

pub use error::{PlanError, SimulationError};
