//! Role configuration
//!
//! Every knob has a default matching the reference market; override with the
//! `with_*` builders or deserialize from JSON (missing fields keep defaults).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Company announcement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Announcement period (ms)
    pub period_ms: u64,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self { period_ms: 5000 }
    }
}

impl CompanyConfig {
    pub fn with_period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Regulator price adjustment settings
///
/// Each tick: `new = current + trades_since_last * trade_weight - decay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatorConfig {
    /// Adjustment period (ms)
    pub period_ms: u64,
    /// Price added per trade since the previous tick
    pub trade_weight: Decimal,
    /// Price removed every tick
    pub decay: Decimal,
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            period_ms: 3000,
            trade_weight: dec!(0.5),
            decay: dec!(1),
        }
    }
}

impl RegulatorConfig {
    pub fn with_period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn with_trade_weight(mut self, trade_weight: Decimal) -> Self {
        self.trade_weight = trade_weight;
        self
    }

    pub fn with_decay(mut self, decay: Decimal) -> Self {
        self.decay = decay;
        self
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Information trader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoTraderConfig {
    /// Starting capital
    pub endowment: Decimal,
    /// Trust in a company before any announcement
    pub initial_trust: Decimal,
    /// Trust moved by one success/fail announcement
    pub trust_step: Decimal,
    /// Buy when trust is strictly above this
    pub buy_threshold: Decimal,
    /// Sell when trust is strictly below this
    pub sell_threshold: Decimal,
    /// Units per trade
    pub lot: u32,
}

impl Default for InfoTraderConfig {
    fn default() -> Self {
        Self {
            endowment: dec!(10000),
            initial_trust: dec!(0.5),
            trust_step: dec!(0.1),
            buy_threshold: dec!(0.7),
            sell_threshold: dec!(0.3),
            lot: 5,
        }
    }
}

impl InfoTraderConfig {
    pub fn with_endowment(mut self, endowment: Decimal) -> Self {
        self.endowment = endowment;
        self
    }

    pub fn with_lot(mut self, lot: u32) -> Self {
        self.lot = lot;
        self
    }

    pub fn with_thresholds(mut self, buy_above: Decimal, sell_below: Decimal) -> Self {
        self.buy_threshold = buy_above;
        self.sell_threshold = sell_below;
        self
    }
}

/// Trend trader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendTraderConfig {
    /// Decision period (ms)
    pub period_ms: u64,
    /// Starting capital
    pub endowment: Decimal,
    /// Chance per tick of a random 50/50 buy-or-sell instead of following the trend
    pub noise_probability: f64,
    /// Compare the latest price with the one `lookback` samples back (inclusive)
    pub lookback: usize,
    /// Minimum absolute price move that counts as a trend
    pub threshold: Decimal,
    /// Units per trend trade
    pub lot: u32,
    /// Units per noise trade
    pub noise_lot: u32,
}

impl Default for TrendTraderConfig {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            endowment: dec!(10000),
            noise_probability: 0.1,
            lookback: 3,
            threshold: dec!(5.0),
            lot: 10,
            noise_lot: 1,
        }
    }
}

impl TrendTraderConfig {
    pub fn with_period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    pub fn with_endowment(mut self, endowment: Decimal) -> Self {
        self.endowment = endowment;
        self
    }

    pub fn with_noise_probability(mut self, noise_probability: f64) -> Self {
        self.noise_probability = noise_probability;
        self
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(CompanyConfig::default().period(), Duration::from_secs(5));
        assert_eq!(RegulatorConfig::default().period(), Duration::from_secs(3));
        assert_eq!(TrendTraderConfig::default().period(), Duration::from_secs(1));
        assert_eq!(InfoTraderConfig::default().lot, 5);
        assert_eq!(TrendTraderConfig::default().lookback, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TrendTraderConfig =
            serde_json::from_str(r#"{ "noise_probability": 0.0, "lot": 20 }"#).unwrap();

        assert_eq!(config.noise_probability, 0.0);
        assert_eq!(config.lot, 20);
        assert_eq!(config.threshold, dec!(5.0));
        assert_eq!(config.period_ms, 1000);
    }
}
