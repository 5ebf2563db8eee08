//! History points kept per company by the market state
//!
//! All timestamps are elapsed seconds since the simulation started, which is
//! the x-axis shared by every series.

use serde::{Deserialize, Serialize};

use crate::values::Price;

/// One sample of a company's price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: f64,
    pub price: Price,
}

impl PricePoint {
    pub fn new(timestamp: f64, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// A recorded trade, e.g. `"info-trader BUY 5"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub timestamp: f64,
    pub description: String,
}

impl TradeEvent {
    pub fn new(timestamp: f64, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }
}

/// Cumulative trade count at the end of a time bucket
///
/// Trades landing in the same bucket as the latest point overwrite its count
/// instead of appending a new point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeCountPoint {
    pub timestamp: f64,
    pub count: u64,
}

impl TradeCountPoint {
    pub fn new(timestamp: f64, count: u64) -> Self {
        Self { timestamp, count }
    }
}
