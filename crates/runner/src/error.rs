use bourse_market::MarketError;
use bourse_runtime::RuntimeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config file {path}: {error}")]
    ConfigIo { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl SimulationError {
    /// True when the simulation could not start because of its inputs
    pub fn is_configuration(&self) -> bool {
        match self {
            SimulationError::InvalidConfig(_)
            | SimulationError::ConfigIo { .. }
            | SimulationError::ConfigParse(_) => true,
            SimulationError::Market(e) => e.is_configuration(),
            SimulationError::Runtime(e) => e.is_configuration(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
