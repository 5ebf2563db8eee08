//! Bourse Runner - simulation orchestration
//!
//! Builds the shared world (market, directory, router), starts every agent
//! on one scheduler, and tears it all down again:
//!
//! ```text
//!   SimulationConfig ──► Simulation::start
//!                          ├─ MarketState::init_with(companies, price)
//!                          ├─ Directory + MessageRouter
//!                          └─ Scheduler
//!                               ├─ InfoTrader x N   (subscribe first)
//!                               ├─ CompanyAgent per company
//!                               ├─ RegulatorAgent
//!                               └─ TrendTrader x M
//!
//!   Simulation::stop ──► Scheduler::stop_all ──► SimulationReport
//! ```

pub mod config;
pub mod error;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use simulation::{Simulation, SimulationReport};
