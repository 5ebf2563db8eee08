//! Market State - prices and histories shared by every agent

use bourse_clock::{Clock, WorldClock};
use bourse_core::{CompanyId, Price, PricePoint, TradeCountPoint, TradeEvent};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::update::{MarketSnapshot, MarketUpdate};

/// Per-company state, guarded by its own lock
#[derive(Debug)]
struct CompanyBook {
    price: Price,
    price_history: VecDeque<PricePoint>,
    trade_history: VecDeque<TradeEvent>,
    trade_counts: VecDeque<TradeCountPoint>,
    /// Cumulative, never evicted
    total_trades: u64,
}

impl CompanyBook {
    fn seeded(initial_price: Price) -> Self {
        Self {
            price: initial_price,
            price_history: VecDeque::from([PricePoint::new(0.0, initial_price)]),
            trade_history: VecDeque::new(),
            trade_counts: VecDeque::from([TradeCountPoint::new(0.0, 0)]),
            total_trades: 0,
        }
    }
}

fn truncate_front<T>(series: &mut VecDeque<T>, bound: usize) {
    while series.len() > bound {
        series.pop_front();
    }
}

/// Shared market store
///
/// The company map is fixed at [`MarketState::init`]; each company's book has
/// its own mutex so unrelated companies never contend. Reads clone out of the
/// lock, so a reader never observes a half-applied update.
pub struct MarketState {
    config: MarketConfig,
    clock: Arc<dyn Clock>,
    companies: Vec<CompanyId>,
    books: HashMap<CompanyId, Mutex<CompanyBook>>,
    updates: broadcast::Sender<MarketUpdate>,
}

impl MarketState {
    /// Seed every company with `initial_price` using the default config and a
    /// fresh real-time clock
    pub fn init(companies: Vec<CompanyId>, initial_price: Price) -> Result<Self> {
        Self::init_with(
            companies,
            initial_price,
            MarketConfig::default(),
            WorldClock::new(),
        )
    }

    /// Seed every company with `initial_price`, a single price point and a
    /// zero trade count at elapsed time 0
    pub fn init_with(
        companies: Vec<CompanyId>,
        initial_price: Price,
        config: MarketConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if companies.is_empty() {
            return Err(MarketError::NoCompanies);
        }
        if initial_price <= Decimal::ZERO {
            return Err(MarketError::NonPositivePrice(initial_price));
        }
        if config.min_price <= Decimal::ZERO {
            return Err(MarketError::NonPositiveFloor(config.min_price));
        }
        if config.max_history == 0 {
            return Err(MarketError::ZeroHistoryBound);
        }

        let mut books = HashMap::with_capacity(companies.len());
        for company in &companies {
            if books
                .insert(company.clone(), Mutex::new(CompanyBook::seeded(initial_price)))
                .is_some()
            {
                return Err(MarketError::DuplicateCompany(company.clone()));
            }
        }

        let (updates, _) = broadcast::channel(config.update_capacity.max(1));

        log::info!(
            "Market initialized: {} companies at {} (history bound {}, clock {})",
            companies.len(),
            initial_price,
            config.max_history,
            clock.name()
        );

        Ok(Self {
            config,
            clock,
            companies,
            books,
            updates,
        })
    }

    fn book(&self, company: &CompanyId) -> Result<&Mutex<CompanyBook>> {
        self.books
            .get(company)
            .ok_or_else(|| MarketError::UnknownCompany(company.clone()))
    }

    fn publish(&self, update: MarketUpdate) {
        // No subscribers is ok
        if self.updates.send(update).is_err() {
            log::trace!("No market update subscribers");
        }
    }

    /// Companies in the order they were listed at init
    pub fn companies(&self) -> &[CompanyId] {
        &self.companies
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Seconds since the simulation started, per the market clock
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    /// Subscribe to every subsequent price adjustment and recorded trade
    pub fn subscribe(&self) -> broadcast::Receiver<MarketUpdate> {
        self.updates.subscribe()
    }

    /// Set a new price, floored at the configured minimum
    ///
    /// Returns the price actually applied.
    pub fn adjust_price(&self, company: &CompanyId, proposed: Price) -> Result<Price> {
        let price = proposed.max(self.config.min_price);
        let point = {
            let mut book = self.book(company)?.lock();
            // Timestamp under the lock keeps the series ordered
            let point = PricePoint::new(self.clock.elapsed_secs(), price);
            book.price = price;
            book.price_history.push_back(point);
            truncate_front(&mut book.price_history, self.config.max_history);
            point
        };

        if proposed < price {
            log::debug!("[{}] Price {} floored to {}", company, proposed, price);
        }
        self.publish(MarketUpdate::PriceAdjusted {
            company: company.clone(),
            point,
        });
        Ok(price)
    }

    /// Append a trade and update the bucketed trade-count series
    ///
    /// A trade in the same bucket as the latest count point overwrites that
    /// point's count; a later bucket appends a new point. Trade history and
    /// count history are bounded independently. Returns the cumulative count.
    pub fn record_trade(&self, company: &CompanyId, description: impl Into<String>) -> Result<u64> {
        let (event, total_trades) = {
            let mut book = self.book(company)?.lock();
            let elapsed = self.clock.elapsed_secs();
            let bucket = self.config.bucket_start(elapsed);

            book.total_trades += 1;
            let total_trades = book.total_trades;

            let event = TradeEvent::new(elapsed, description);
            book.trade_history.push_back(event.clone());
            truncate_front(&mut book.trade_history, self.config.max_history);

            match book.trade_counts.back_mut() {
                Some(last) if bucket <= last.timestamp => last.count = total_trades,
                _ => book
                    .trade_counts
                    .push_back(TradeCountPoint::new(bucket, total_trades)),
            }
            truncate_front(&mut book.trade_counts, self.config.max_history);

            (event, total_trades)
        };

        log::debug!("[{}] Trade: {}", company, event.description);
        self.publish(MarketUpdate::TradeRecorded {
            company: company.clone(),
            event,
            total_trades,
        });
        Ok(total_trades)
    }

    pub fn current_price(&self, company: &CompanyId) -> Result<Price> {
        Ok(self.book(company)?.lock().price)
    }

    pub fn price_history(&self, company: &CompanyId) -> Result<Vec<PricePoint>> {
        Ok(self.book(company)?.lock().price_history.iter().copied().collect())
    }

    pub fn trade_history(&self, company: &CompanyId) -> Result<Vec<TradeEvent>> {
        Ok(self.book(company)?.lock().trade_history.iter().cloned().collect())
    }

    pub fn trade_count_history(&self, company: &CompanyId) -> Result<Vec<TradeCountPoint>> {
        Ok(self.book(company)?.lock().trade_counts.iter().copied().collect())
    }

    /// Cumulative number of trades ever recorded for `company`
    pub fn total_trades(&self, company: &CompanyId) -> Result<u64> {
        Ok(self.book(company)?.lock().total_trades)
    }

    /// All series of one company, read under a single lock acquisition
    pub fn snapshot(&self, company: &CompanyId) -> Result<MarketSnapshot> {
        let book = self.book(company)?.lock();
        Ok(MarketSnapshot {
            company: company.clone(),
            price: book.price,
            price_history: book.price_history.iter().copied().collect(),
            trade_history: book.trade_history.iter().cloned().collect(),
            trade_count_history: book.trade_counts.iter().copied().collect(),
            total_trades: book.total_trades,
        })
    }

    /// Snapshots of every company, in listing order
    pub fn snapshot_all(&self) -> Result<Vec<MarketSnapshot>> {
        self.companies.iter().map(|c| self.snapshot(c)).collect()
    }
}

impl std::fmt::Debug for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketState")
            .field("companies", &self.companies)
            .field("config", &self.config)
            .finish()
    }
}
