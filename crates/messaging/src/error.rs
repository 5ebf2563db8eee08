//! Error types for the messaging crate

use bourse_core::AgentId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    #[error("Mailbox already registered for agent {0}")]
    DuplicateMailbox(AgentId),

    #[error("No mailbox registered for agent {0}")]
    UnknownReceiver(AgentId),

    #[error("Mailbox of agent {0} is closed")]
    MailboxClosed(AgentId),
}

pub type Result<T> = std::result::Result<T, MessagingError>;
