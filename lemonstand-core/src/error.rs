use thiserror::Error;

/// Errors a simulated day can end with.
///
/// Settlement is the only step that can refuse a day. Stock-outs, zero traffic and
/// empty inventories are ordinary outcomes and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Day {day}: order costs ${required:.2} but only ${available:.2} is available")]
    InsufficientFunds {
        day: u32,
        required: f64,
        available: f64,
    },
}

/// Rejections raised while building a recipe or a day plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Price per unit must be positive and finite, got {0}")]
    InvalidPrice(f64),

    #[error("A batch must yield at least one unit")]
    ZeroYield,
}
