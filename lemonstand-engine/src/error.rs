use thiserror::Error;

use lemonstand_config::ConfigError;
use lemonstand_core::SimulationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_yaml::Error),
}
