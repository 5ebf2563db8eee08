//! Information trader - trades on company announcements
//!
//! ```text
//!   "C1:success" ──► trust(C1) += step ──► trust > buy_threshold  ──► BUY lot
//!   "C1:fail"    ──► trust(C1) -= step ──► trust < sell_threshold ──► SELL lot
//!   "C1:risk"    ──► unchanged
//! ```

use bourse_core::{AgentId, CompanyId, Message, ServiceDescriptor};
use bourse_market::MarketState;
use bourse_runtime::{Agent, AgentContext, Behavior, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::InfoTraderConfig;
use crate::event::{CompanyEvent, Outcome};
use crate::trader::{TradeOutcome, Trader};

/// Per-company trust, always within `[0, 1]`
#[derive(Debug, Clone)]
pub struct TrustBook {
    initial: Decimal,
    step: Decimal,
    levels: HashMap<CompanyId, Decimal>,
}

impl TrustBook {
    pub fn new(initial: Decimal, step: Decimal) -> Self {
        Self {
            initial: initial.clamp(Decimal::ZERO, Decimal::ONE),
            step,
            levels: HashMap::new(),
        }
    }

    pub fn get(&self, company: &CompanyId) -> Decimal {
        self.levels.get(company).copied().unwrap_or(self.initial)
    }

    /// Fold one outcome into `company`'s trust and return the new level
    pub fn apply(&mut self, company: &CompanyId, outcome: Outcome) -> Decimal {
        let current = self.get(company);
        let moved = match outcome {
            Outcome::Success => current + self.step,
            Outcome::Fail => current - self.step,
            Outcome::Risk => current,
        };
        let clamped = moved.clamp(Decimal::ZERO, Decimal::ONE);
        self.levels.insert(company.clone(), clamped);
        clamped
    }
}

/// Subscribes to announcements and trades on accumulated trust
pub struct InfoTrader {
    trader: Trader,
    config: InfoTraderConfig,
    trust: TrustBook,
}

impl InfoTrader {
    pub fn new(id: impl Into<AgentId>, config: InfoTraderConfig) -> Self {
        Self {
            trader: Trader::new(id.into(), config.endowment),
            trust: TrustBook::new(config.initial_trust, config.trust_step),
            config,
        }
    }

    pub fn trader(&self) -> &Trader {
        &self.trader
    }

    pub fn trust(&self) -> &TrustBook {
        &self.trust
    }

    /// React to one announcement
    ///
    /// Returns `None` when trust lands between the thresholds.
    pub fn on_event(
        &mut self,
        market: &MarketState,
        event: &CompanyEvent,
    ) -> bourse_market::Result<Option<TradeOutcome>> {
        let trust = self.trust.apply(&event.company, event.outcome);
        log::debug!(
            "[{}] Heard {}, trust now {}",
            self.trader.id(),
            event,
            trust
        );

        if trust > self.config.buy_threshold {
            self.trader
                .buy(market, &event.company, self.config.lot)
                .map(Some)
        } else if trust < self.config.sell_threshold {
            self.trader
                .sell(market, &event.company, self.config.lot)
                .map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse and handle a mailbox message; anomalies are logged and dropped
    pub fn on_message(
        &mut self,
        market: &MarketState,
        message: &Message,
    ) -> bourse_market::Result<()> {
        if !message.is_inform() {
            log::debug!(
                "[{}] Ignoring {:?} from {}",
                self.trader.id(),
                message.performative,
                message.sender
            );
            return Ok(());
        }

        let event = match message.content.parse::<CompanyEvent>() {
            Ok(event) => event,
            Err(e) => {
                log::warn!(
                    "[{}] Dropping message from {}: {}",
                    self.trader.id(),
                    message.sender,
                    e
                );
                return Ok(());
            }
        };

        if !market.companies().contains(&event.company) {
            log::warn!(
                "[{}] Dropping announcement for unlisted company {}",
                self.trader.id(),
                event.company
            );
            return Ok(());
        }

        self.on_event(market, &event).map(|_| ())
    }
}

impl Agent for InfoTrader {
    fn id(&self) -> &AgentId {
        self.trader.id()
    }

    fn agent_type(&self) -> &'static str {
        "InfoTrader"
    }

    fn setup(&mut self, ctx: &AgentContext) -> Result<()> {
        ctx.register_service(&ServiceDescriptor::event_subscriber());
        Ok(())
    }

    fn behaviors(mut self: Box<Self>) -> Vec<Behavior> {
        vec![Behavior::cyclic(
            move |message: Message, ctx: &AgentContext| -> Result<()> {
                self.on_message(ctx.market(), &message)?;
                Ok(())
            },
        )]
    }
}
