pub mod diagnostics;
pub mod error;
pub mod runtime;

pub use diagnostics::{DiagnosticsCollector, ViolationReport};
pub use error::EngineError;
// Re-export the runtime functions so frontends can simply do:
pub use runtime::{run_fuzz_mode, run_simulation_mode, FuzzReport, RunReport, SimulationOverrides};
