use bourse_core::{MAX_HISTORY, MIN_PRICE, Price};
use serde::{Deserialize, Serialize};

/// Market state configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Price floor applied to every adjustment
    pub min_price: Price,
    /// Bound on each per-company history series
    pub max_history: usize,
    /// Width of a trade-count bucket in milliseconds (0 disables bucketing)
    pub bucket_width_ms: u64,
    /// Capacity of the market update broadcast channel
    pub update_capacity: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            min_price: MIN_PRICE,
            max_history: MAX_HISTORY,
            bucket_width_ms: 1,
            update_capacity: 1024,
        }
    }
}

impl MarketConfig {
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_bucket_width_ms(mut self, width_ms: u64) -> Self {
        self.bucket_width_ms = width_ms;
        self
    }

    pub fn with_min_price(mut self, min_price: Price) -> Self {
        self.min_price = min_price;
        self
    }

    /// Start of the bucket `elapsed_secs` falls in
    pub fn bucket_start(&self, elapsed_secs: f64) -> f64 {
        if self.bucket_width_ms == 0 {
            return elapsed_secs;
        }
        let width = self.bucket_width_ms as f64;
        (elapsed_secs * 1000.0 / width).floor() * width / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = MarketConfig::default();
        assert_eq!(config.max_history, 50);
        assert_eq!(config.min_price, MIN_PRICE);
    }

    #[test]
    fn test_bucket_start() {
        let config = MarketConfig::default().with_bucket_width_ms(500);
        assert_eq!(config.bucket_start(0.2), 0.0);
        assert_eq!(config.bucket_start(0.7), 0.5);
        assert_eq!(config.bucket_start(1.0), 1.0);

        let unbucketed = MarketConfig::default().with_bucket_width_ms(0);
        assert_eq!(unbucketed.bucket_start(0.123456), 0.123456);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: MarketConfig = serde_json::from_str(r#"{"max_history": 10}"#).unwrap();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.bucket_width_ms, 1);
    }
}
