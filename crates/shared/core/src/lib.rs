//! Bourse Core Domain
//!
//! Pure domain types shared by every Bourse crate: identifiers, service
//! descriptors, agent messages and the history points kept by the market.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod ids;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    EVENT_SUBSCRIBER, Message, MessageId, Performative, PricePoint, ServiceDescriptor, Side,
    TradeCountPoint, TradeEvent,
};
pub use ids::{AgentId, CompanyId};
pub use values::{MAX_HISTORY, MIN_PRICE, Price, Timestamp};
