use bourse_core::{CompanyId, Price, PricePoint, TradeCountPoint, TradeEvent};
use serde::{Deserialize, Serialize};

/// Change pushed to market subscribers after every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketUpdate {
    PriceAdjusted {
        company: CompanyId,
        point: PricePoint,
    },
    TradeRecorded {
        company: CompanyId,
        event: TradeEvent,
        total_trades: u64,
    },
}

impl MarketUpdate {
    /// Get the company this update relates to
    pub fn company(&self) -> &CompanyId {
        match self {
            MarketUpdate::PriceAdjusted { company, .. } => company,
            MarketUpdate::TradeRecorded { company, .. } => company,
        }
    }
}

/// Consistent read of one company's state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub company: CompanyId,
    pub price: Price,
    pub price_history: Vec<PricePoint>,
    pub trade_history: Vec<TradeEvent>,
    pub trade_count_history: Vec<TradeCountPoint>,
    pub total_trades: u64,
}
