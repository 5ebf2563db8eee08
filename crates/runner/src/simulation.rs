//! Simulation - wires the shared world and runs every agent on it

use bourse_agents::{CompanyAgent, InfoTrader, RegulatorAgent, TrendTrader};
use bourse_clock::WorldClock;
use bourse_core::AgentId;
use bourse_market::{MarketSnapshot, MarketState};
use bourse_messaging::{Directory, MessageRouter};
use bourse_runtime::Scheduler;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::error::Result;

const COMPANY_SEEDS: u64 = 0;
const TREND_SEEDS: u64 = 1;

/// Final state of a stopped simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Simulated seconds since the market opened
    pub elapsed_secs: f64,
    /// Agents that were running when the simulation stopped
    pub agents: usize,
    pub stopped_at: DateTime<Utc>,
    /// Per-company market state, in listing order
    pub companies: Vec<MarketSnapshot>,
}

impl SimulationReport {
    /// Total trades across all companies
    pub fn total_trades(&self) -> u64 {
        self.companies.iter().map(|s| s.total_trades).sum()
    }
}

/// A running market with its agents
///
/// Must be started from within a tokio runtime.
pub struct Simulation {
    config: SimulationConfig,
    market: Arc<MarketState>,
    scheduler: Scheduler,
}

impl Simulation {
    /// Build the market and start every agent
    ///
    /// Information traders are started before the companies so that they
    /// are subscribed before the first announcement.
    pub fn start(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let market = Arc::new(MarketState::init_with(
            config.companies.clone(),
            config.initial_price,
            config.market.clone(),
            WorldClock::new(),
        )?);
        let router = Arc::new(MessageRouter::new(Arc::new(Directory::new())));
        let mut scheduler = Scheduler::new(market.clone(), router);

        log::info!(
            "Starting simulation: {} companies at {}, {} info trader(s), {} trend trader(s)",
            config.companies.len(),
            config.initial_price,
            config.info_traders,
            config.trend_traders
        );

        for i in 0..config.info_traders {
            let id = AgentId::new(format!("info-trader-{}", i + 1));
            scheduler.start(InfoTrader::new(id, config.info_trader.clone()))?;
        }

        for (i, company) in config.companies.iter().enumerate() {
            let agent = match config.agent_seed(COMPANY_SEEDS, i) {
                Some(seed) => {
                    CompanyAgent::with_seed(company.clone(), config.company.clone(), seed)
                }
                None => CompanyAgent::new(company.clone(), config.company.clone()),
            };
            scheduler.start(agent)?;
        }

        scheduler.start(RegulatorAgent::new(
            AgentId::new("regulator"),
            config.regulator.clone(),
        ))?;

        for i in 0..config.trend_traders {
            let id = AgentId::new(format!("trend-trader-{}", i + 1));
            let agent = match config.agent_seed(TREND_SEEDS, i) {
                Some(seed) => TrendTrader::with_seed(id, config.trend_trader.clone(), seed),
                None => TrendTrader::new(id, config.trend_trader.clone()),
            };
            scheduler.start(agent)?;
        }

        log::info!("Simulation started with {} agent(s)", scheduler.agent_count());

        Ok(Self {
            config,
            market,
            scheduler,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Shared market, for snapshots and update subscriptions while running
    pub fn market(&self) -> &Arc<MarketState> {
        &self.market
    }

    pub fn agents(&self) -> Vec<AgentId> {
        self.scheduler.agents()
    }

    /// Stop every agent, wait for them, and report the final market
    pub async fn stop(mut self) -> Result<SimulationReport> {
        let agents = self.scheduler.stop_all().await;

        let report = SimulationReport {
            elapsed_secs: self.market.elapsed_secs(),
            agents,
            stopped_at: Utc::now(),
            companies: self.market.snapshot_all()?,
        };

        log::info!(
            "Simulation finished after {:.1}s: {} trade(s)",
            report.elapsed_secs,
            report.total_trades()
        );
        Ok(report)
    }

    /// Let the market trade for `duration`, then stop
    pub async fn run_for(self, duration: Duration) -> Result<SimulationReport> {
        log::info!("Simulation running for {:?}...", duration);
        tokio::time::sleep(duration).await;
        self.stop().await
    }

    /// Run for the configured duration
    pub async fn run(self) -> Result<SimulationReport> {
        let duration = self.config.duration();
        self.run_for(duration).await
    }
}
