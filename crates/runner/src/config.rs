//! Simulation configuration

use bourse_agents::{CompanyConfig, InfoTraderConfig, RegulatorConfig, TrendTraderConfig};
use bourse_core::{CompanyId, Price};
use bourse_market::MarketConfig;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SimulationError};

/// Everything needed to start a simulation
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes:
///
/// ```json
/// { "companies": ["C1", "C2", "C3"], "info_traders": 4, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Listed companies, in listing order; each also runs a company agent
    pub companies: Vec<CompanyId>,
    /// Opening price of every company
    pub initial_price: Price,
    /// Number of information traders
    pub info_traders: usize,
    /// Number of trend traders
    pub trend_traders: usize,
    /// Base seed for every agent RNG; `None` seeds from entropy
    pub seed: Option<u64>,
    /// How long `Simulation::run` lets the market trade (ms)
    pub duration_ms: u64,
    pub market: MarketConfig,
    pub company: CompanyConfig,
    pub regulator: RegulatorConfig,
    pub info_trader: InfoTraderConfig,
    pub trend_trader: TrendTraderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            companies: vec![CompanyId::new("C1"), CompanyId::new("C2")],
            initial_price: dec!(100),
            info_traders: 1,
            trend_traders: 1,
            seed: None,
            duration_ms: 60_000,
            market: MarketConfig::default(),
            company: CompanyConfig::default(),
            regulator: RegulatorConfig::default(),
            info_trader: InfoTraderConfig::default(),
            trend_trader: TrendTraderConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults for everything except the listing
    pub fn new(companies: Vec<CompanyId>, initial_price: Price) -> Self {
        Self {
            companies,
            initial_price,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SimulationError::ConfigIo {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SimulationError::ConfigParse(e.to_string()))
    }

    pub fn with_info_traders(mut self, count: usize) -> Self {
        self.info_traders = count;
        self
    }

    pub fn with_trend_traders(mut self, count: usize) -> Self {
        self.trend_traders = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_market(mut self, market: MarketConfig) -> Self {
        self.market = market;
        self
    }

    pub fn with_company(mut self, company: CompanyConfig) -> Self {
        self.company = company;
        self
    }

    pub fn with_regulator(mut self, regulator: RegulatorConfig) -> Self {
        self.regulator = regulator;
        self
    }

    pub fn with_info_trader(mut self, info_trader: InfoTraderConfig) -> Self {
        self.info_trader = info_trader;
        self
    }

    pub fn with_trend_trader(mut self, trend_trader: TrendTraderConfig) -> Self {
        self.trend_trader = trend_trader;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Seed for the `index`-th agent of a role, if seeding is enabled
    pub(crate) fn agent_seed(&self, role: u64, index: usize) -> Option<u64> {
        self.seed
            .map(|base| base.wrapping_add(role.wrapping_mul(1_000_003)).wrapping_add(index as u64))
    }

    /// Role settings the market and scheduler do not check themselves
    pub fn validate(&self) -> Result<()> {
        let noise = self.trend_trader.noise_probability;
        if !(0.0..=1.0).contains(&noise) {
            return Err(SimulationError::InvalidConfig(format!(
                "trend_trader.noise_probability must be within [0, 1], got {}",
                noise
            )));
        }
        if self.trend_trader.lookback == 0 {
            return Err(SimulationError::InvalidConfig(
                "trend_trader.lookback must be at least 1".to_string(),
            ));
        }
        if self.info_trader.sell_threshold > self.info_trader.buy_threshold {
            return Err(SimulationError::InvalidConfig(format!(
                "info_trader.sell_threshold {} exceeds buy_threshold {}",
                self.info_trader.sell_threshold, self.info_trader.buy_threshold
            )));
        }
        Ok(())
    }
}
