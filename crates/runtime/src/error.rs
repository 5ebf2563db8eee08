use bourse_core::AgentId;
use bourse_market::MarketError;
use bourse_messaging::MessagingError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Agent {0} is already running")]
    DuplicateAgent(AgentId),

    #[error("Agent {agent}: behavior period must be positive, got {period:?}")]
    NonPositivePeriod { agent: AgentId, period: Duration },

    #[error("Agent {0} declares more than one cyclic behavior")]
    MultipleCyclic(AgentId),

    #[error("Agent {0} is not running")]
    UnknownAgent(AgentId),

    #[error("Agent {agent} setup failed: {reason}")]
    Setup { agent: AgentId, reason: String },

    #[error("Market error: {0}")]
    Market(#[from] MarketError),

    #[error("Messaging error: {0}")]
    Messaging(#[from] MessagingError),
}

impl RuntimeError {
    /// True for errors that stem from how an agent was declared
    pub fn is_configuration(&self) -> bool {
        match self {
            RuntimeError::DuplicateAgent(_)
            | RuntimeError::NonPositivePeriod { .. }
            | RuntimeError::MultipleCyclic(_)
            | RuntimeError::Setup { .. } => true,
            RuntimeError::Market(e) => e.is_configuration(),
            RuntimeError::Messaging(MessagingError::DuplicateMailbox(_)) => true,
            RuntimeError::UnknownAgent(_) | RuntimeError::Messaging(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
