//! Bourse Runtime - concurrent agent scheduling
//!
//! Agents are plain structs implementing [`Agent`]. At start each agent
//! declares its [`Behavior`]s and the [`Scheduler`] runs every behavior as its
//! own tokio task:
//!
//! - **Ticker**: fires once per period; a slow tick delays the next one, it
//!   never overlaps itself
//! - **Cyclic**: waits on the agent's mailbox and handles each message
//!
//! ```text
//!                 ┌──────────────────────── Scheduler ────────────────────────┐
//!                 │                                                            │
//!   Company C1 ──►│  task: Ticker(5s) ──► router.broadcast("event-subscriber") │
//!   Regulator  ──►│  task: Ticker(3s) ──► market.adjust_price                  │
//!   InfoTrader ──►│  task: Cyclic     ◄── mailbox.receive()                    │
//!   TrendTrader ─►│  task: Ticker(1s) ──► market.price_history / record_trade  │
//!                 │                                                            │
//!                 └─────────────── stop_all(): signal + join ──────────────────┘
//! ```
//!
//! Stop is cooperative: a behavior observes the stop signal only while
//! suspended (between ticks, or inside `receive`), never mid-handler.

pub mod agent;
pub mod behavior;
pub mod context;
pub mod error;
pub mod scheduler;

pub use agent::Agent;
pub use behavior::{Behavior, MessageHandler, TickHandler};
pub use context::AgentContext;
pub use error::{Result, RuntimeError};
pub use scheduler::Scheduler;
