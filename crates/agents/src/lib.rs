//! Bourse Agents - the market's participants
//!
//! - [`CompanyAgent`]: announces a project outcome every period
//! - [`RegulatorAgent`]: moves prices with recent trading activity
//! - [`InfoTrader`]: trades on announcements, weighted by per-company trust
//! - [`TrendTrader`]: trades against short-term price momentum, with noise
//!
//! Traders share the [`Trader`] base: a cash/holdings [`Portfolio`] and
//! buy/sell against the current market price.

pub mod company;
pub mod config;
pub mod event;
pub mod info_trader;
pub mod regulator;
pub mod trader;
pub mod trend_trader;

pub use company::CompanyAgent;
pub use config::{CompanyConfig, InfoTraderConfig, RegulatorConfig, TrendTraderConfig};
pub use event::{CompanyEvent, Outcome, ParseEventError};
pub use info_trader::{InfoTrader, TrustBook};
pub use regulator::RegulatorAgent;
pub use trader::{Portfolio, SkipReason, TradeOutcome, Trader};
pub use trend_trader::{TrendTrader, momentum_signal};
