//! Trend trader - fades short-term price moves, with some noise trading

use bourse_core::{AgentId, PricePoint, Side};
use bourse_market::MarketState;
use bourse_runtime::{Agent, AgentContext, Behavior, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::config::TrendTraderConfig;
use crate::trader::{TradeOutcome, Trader};

/// Contrarian signal from the last `lookback` prices
///
/// `delta = last - history[len - lookback]`; a rise beyond `threshold`
/// says sell, a fall beyond it says buy. `None` while history is shorter
/// than `lookback` or the move is within the threshold.
pub fn momentum_signal(
    history: &[PricePoint],
    lookback: usize,
    threshold: Decimal,
) -> Option<Side> {
    if lookback == 0 || history.len() < lookback {
        return None;
    }
    let last = history.last()?.price;
    let base = history[history.len() - lookback].price;
    let delta = last - base;

    if delta > threshold {
        Some(Side::Sell)
    } else if delta < -threshold {
        Some(Side::Buy)
    } else {
        None
    }
}

pub struct TrendTrader {
    trader: Trader,
    config: TrendTraderConfig,
    rng: StdRng,
}

impl TrendTrader {
    pub fn new(id: impl Into<AgentId>, config: TrendTraderConfig) -> Self {
        Self::with_rng(id.into(), config, StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible decisions
    pub fn with_seed(id: impl Into<AgentId>, config: TrendTraderConfig, seed: u64) -> Self {
        Self::with_rng(id.into(), config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: AgentId, config: TrendTraderConfig, rng: StdRng) -> Self {
        Self {
            trader: Trader::new(id, config.endowment),
            config,
            rng,
        }
    }

    pub fn trader(&self) -> &Trader {
        &self.trader
    }

    /// One decision round on a randomly picked company
    pub fn decide(
        &mut self,
        market: &MarketState,
    ) -> bourse_market::Result<Option<TradeOutcome>> {
        let companies = market.companies();
        if companies.is_empty() {
            return Ok(None);
        }
        let company = &companies[self.rng.gen_range(0..companies.len())];

        let noise = self.config.noise_probability.clamp(0.0, 1.0);
        if self.rng.gen_bool(noise) {
            let lot = self.config.noise_lot;
            let outcome = if self.rng.gen_bool(0.5) {
                self.trader.buy(market, company, lot)?
            } else {
                self.trader.sell(market, company, lot)?
            };
            log::debug!("[{}] Noise trade on {}: {:?}", self.trader.id(), company, outcome);
            return Ok(Some(outcome));
        }

        let history = market.price_history(company)?;
        let lot = self.config.lot;
        match momentum_signal(&history, self.config.lookback, self.config.threshold) {
            Some(Side::Buy) => self.trader.buy(market, company, lot).map(Some),
            Some(Side::Sell) => self.trader.sell(market, company, lot).map(Some),
            None => Ok(None),
        }
    }
}

impl Agent for TrendTrader {
    fn id(&self) -> &AgentId {
        self.trader.id()
    }

    fn agent_type(&self) -> &'static str {
        "TrendTrader"
    }

    fn behaviors(mut self: Box<Self>) -> Vec<Behavior> {
        let period = self.config.period();
        vec![Behavior::ticker(period, move |ctx: &AgentContext| -> Result<()> {
            self.decide(ctx.market())?;
            Ok(())
        })]
    }
}
