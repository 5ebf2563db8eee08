//! Trader base - portfolio plus buy/sell at the current market price
//!
//! Trades settle immediately against `MarketState`'s current price; there is
//! no order book. A trade the portfolio cannot afford is skipped, not failed.

use bourse_core::{AgentId, CompanyId, Price, Side};
use bourse_market::{MarketState, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Cash and per-company holdings of one trader
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    capital: Decimal,
    holdings: HashMap<CompanyId, u32>,
}

impl Portfolio {
    pub fn new(capital: Decimal) -> Self {
        Self {
            capital,
            holdings: HashMap::new(),
        }
    }

    pub fn capital(&self) -> Decimal {
        self.capital
    }

    pub fn held(&self, company: &CompanyId) -> u32 {
        self.holdings.get(company).copied().unwrap_or(0)
    }

    /// Mark-to-market value given current prices
    pub fn value(&self, prices: &HashMap<CompanyId, Price>) -> Decimal {
        self.holdings
            .iter()
            .filter_map(|(company, qty)| prices.get(company).map(|p| *p * Decimal::from(*qty)))
            .sum::<Decimal>()
            + self.capital
    }
}

/// Why a trade did not happen
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    InsufficientFunds { cost: Decimal, capital: Decimal },
    InsufficientHoldings { held: u32, wanted: u32 },
}

/// What a buy or sell did
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Executed {
        side: Side,
        amount: u32,
        price: Price,
    },
    Skipped(SkipReason),
}

impl TradeOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeOutcome::Executed { .. })
    }
}

/// Identity plus portfolio; the shared part of every trading role
#[derive(Debug, Clone)]
pub struct Trader {
    id: AgentId,
    portfolio: Portfolio,
}

impl Trader {
    pub fn new(id: AgentId, endowment: Decimal) -> Self {
        Self {
            id,
            portfolio: Portfolio::new(endowment),
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Buy `amount` units at the current price if capital covers it
    ///
    /// Records `"<agent> BUY <amount>"` on success. Errors only on an
    /// unknown company.
    pub fn buy(
        &mut self,
        market: &MarketState,
        company: &CompanyId,
        amount: u32,
    ) -> Result<TradeOutcome> {
        let price = market.current_price(company)?;
        let cost = price * Decimal::from(amount);

        if self.portfolio.capital < cost {
            log::debug!(
                "[{}] BUY {} {} skipped: cost {} exceeds capital {}",
                self.id,
                amount,
                company,
                cost,
                self.portfolio.capital
            );
            return Ok(TradeOutcome::Skipped(SkipReason::InsufficientFunds {
                cost,
                capital: self.portfolio.capital,
            }));
        }

        self.portfolio.capital -= cost;
        *self.portfolio.holdings.entry(company.clone()).or_insert(0) += amount;
        self.record(market, company, Side::Buy, amount, price)
    }

    /// Sell `amount` units at the current price if enough are held
    ///
    /// Records `"<agent> SELL <amount>"` on success. Errors only on an
    /// unknown company.
    pub fn sell(
        &mut self,
        market: &MarketState,
        company: &CompanyId,
        amount: u32,
    ) -> Result<TradeOutcome> {
        let held = self.portfolio.held(company);
        if held < amount {
            log::debug!(
                "[{}] SELL {} {} skipped: only {} held",
                self.id,
                amount,
                company,
                held
            );
            return Ok(TradeOutcome::Skipped(SkipReason::InsufficientHoldings {
                held,
                wanted: amount,
            }));
        }

        let price = market.current_price(company)?;
        self.portfolio.capital += price * Decimal::from(amount);
        self.portfolio.holdings.insert(company.clone(), held - amount);
        self.record(market, company, Side::Sell, amount, price)
    }

    fn record(
        &self,
        market: &MarketState,
        company: &CompanyId,
        side: Side,
        amount: u32,
        price: Price,
    ) -> Result<TradeOutcome> {
        let total = market.record_trade(company, format!("{} {} {}", self.id, side, amount))?;
        log::debug!(
            "[{}] {} {} {} @ {} (trade #{})",
            self.id,
            side,
            amount,
            company,
            price,
            total
        );
        Ok(TradeOutcome::Executed {
            side,
            amount,
            price,
        })
    }
}
