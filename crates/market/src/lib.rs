//! Bourse Market - shared market state
//!
//! One [`MarketState`] instance is created at simulation start and handed to
//! every agent. It holds, per company:
//!
//! - the current price (never below `MIN_PRICE`)
//! - a bounded price history
//! - a bounded trade history
//! - a bounded, bucket-coalesced trade-count history
//!
//! ## Locking
//!
//! ```text
//!  companies (immutable after init)
//!  ┌──────┬──────────────────────┐
//!  │  C1  │ Mutex<CompanyBook>   │◄── adjust_price / record_trade / reads
//!  ├──────┼──────────────────────┤
//!  │  C2  │ Mutex<CompanyBook>   │◄── independent lock, no contention with C1
//!  └──────┴──────────────────────┘
//! ```
//!
//! Every mutation is also pushed as a [`MarketUpdate`] on a broadcast channel
//! so a renderer can follow the market without polling.

pub mod config;
pub mod error;
pub mod state;
pub mod update;

pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use state::MarketState;
pub use update::{MarketSnapshot, MarketUpdate};
