//! Bourse Messaging
//!
//! Discovery-based message routing between agents. Provides:
//! - [`Directory`]: service type -> agents currently offering it
//! - [`Mailbox`] / [`Postbox`]: per-agent inbound FIFO queue (receive / post halves)
//! - [`MessageRouter`]: delivery to explicit receivers or to a service type
//!
//! ## Architecture
//!
//! ```text
//!  Company ──broadcast("event-subscriber")──┐
//!                                           ▼
//!                                  ┌────────────────┐  find_by_type  ┌───────────┐
//!                                  │ MessageRouter  │───────────────►│ Directory │
//!                                  └───────┬────────┘                └───────────┘
//!                          post to each    │
//!                   ┌──────────────────────┼──────────────────────┐
//!                   ▼                      ▼                      ▼
//!             ┌──────────┐           ┌──────────┐           ┌──────────┐
//!             │ Mailbox  │           │ Mailbox  │           │ Mailbox  │
//!             │ trader-1 │           │ trader-2 │           │ trader-n │
//!             └──────────┘           └──────────┘           └──────────┘
//! ```
//!
//! Senders never need to know their receivers in advance; the directory is
//! consulted at send time.

pub mod directory;
pub mod error;
pub mod mailbox;
pub mod router;

// Re-export commonly used types
pub use directory::Directory;
pub use error::{MessagingError, Result};
pub use mailbox::{Mailbox, Postbox, Received};
pub use router::MessageRouter;
