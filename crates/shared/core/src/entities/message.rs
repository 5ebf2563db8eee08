//! Inter-agent messages

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::AgentId;
use crate::values::Timestamp;

/// Unique identifier for a message
pub type MessageId = Uuid;

/// Communicative act of a message
///
/// Only `Inform` is produced by the market roles; the rest are accepted by
/// the router so roles can grow request/response conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Performative {
    Inform,
    Request,
    Agree,
    Refuse,
    Failure,
    Confirm,
}

/// Message delivered between agent mailboxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub performative: Performative,
    pub sender: AgentId,
    pub content: String,
    /// Wall-clock send time, for log correlation only
    pub sent_at: Timestamp,
}

impl Message {
    pub fn new(performative: Performative, sender: AgentId, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            performative,
            sender,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    /// Create an `Inform` message
    pub fn inform(sender: AgentId, content: impl Into<String>) -> Self {
        Self::new(Performative::Inform, sender, content)
    }

    pub fn is_inform(&self) -> bool {
        self.performative == Performative::Inform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inform_message() {
        let msg = Message::inform(AgentId::new("C1"), "C1:success");
        assert!(msg.is_inform());
        assert_eq!(msg.sender.as_str(), "C1");
        assert_eq!(msg.content, "C1:success");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::inform(AgentId::new("C1"), "C1:risk");
        let b = Message::inform(AgentId::new("C1"), "C1:risk");
        assert_ne!(a.id, b.id);
    }
}
