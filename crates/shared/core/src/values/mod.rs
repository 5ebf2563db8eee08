use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Wall-clock timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Lowest price a company can trade at; lower proposals are floored to this
pub const MIN_PRICE: Price = dec!(1.0);

/// Default bound on every per-company history series
pub const MAX_HISTORY: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_price_is_one() {
        assert_eq!(MIN_PRICE, Decimal::ONE);
    }
}
