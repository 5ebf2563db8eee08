//! Regulator agent - trade-driven price adjustment

use bourse_core::{AgentId, CompanyId, Price};
use bourse_market::MarketState;
use bourse_runtime::{Agent, AgentContext, Behavior, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::RegulatorConfig;

/// Every period, for each company:
/// `new = current + trades_since_last_tick * trade_weight - decay`
///
/// Quiet companies drift down by `decay` per tick; busy ones climb. The
/// market floors the result at its minimum price.
pub struct RegulatorAgent {
    id: AgentId,
    config: RegulatorConfig,
    last_seen: HashMap<CompanyId, u64>,
}

impl RegulatorAgent {
    pub fn new(id: impl Into<AgentId>, config: RegulatorConfig) -> Self {
        Self {
            id: id.into(),
            config,
            last_seen: HashMap::new(),
        }
    }

    /// Apply one adjustment round; returns the prices the market accepted
    pub fn regulate(
        &mut self,
        market: &MarketState,
    ) -> bourse_market::Result<Vec<(CompanyId, Price)>> {
        let mut adjusted = Vec::with_capacity(market.companies().len());
        for company in market.companies() {
            let total = market.total_trades(company)?;
            let previous = self.last_seen.insert(company.clone(), total).unwrap_or(0);
            let since = total.saturating_sub(previous);

            let current = market.current_price(company)?;
            let proposed =
                current + Decimal::from(since) * self.config.trade_weight - self.config.decay;
            let accepted = market.adjust_price(company, proposed)?;

            log::debug!(
                "[{}] {}: {} trade(s) since last tick, {} -> {}",
                self.id,
                company,
                since,
                current,
                accepted
            );
            adjusted.push((company.clone(), accepted));
        }
        Ok(adjusted)
    }
}

impl Agent for RegulatorAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn agent_type(&self) -> &'static str {
        "Regulator"
    }

    fn behaviors(mut self: Box<Self>) -> Vec<Behavior> {
        let period = self.config.period();
        vec![Behavior::ticker(period, move |ctx: &AgentContext| -> Result<()> {
            self.regulate(ctx.market())?;
            Ok(())
        })]
    }
}
