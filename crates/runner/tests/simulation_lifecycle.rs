//! Simulation lifecycle tests
//!
//! Runs whole simulations with tokio time paused, so a minute of market
//! time costs milliseconds.

use bourse_agents::{CompanyConfig, TrendTraderConfig};
use bourse_core::{AgentId, CompanyId, MAX_HISTORY, MIN_PRICE};
use bourse_market::{MarketConfig, MarketUpdate};
use bourse_runner::{Simulation, SimulationConfig};
use rust_decimal_macros::dec;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_reference_market_runs_and_stops() {
    let _ = env_logger::try_init();
    let config = SimulationConfig::default().with_seed(42);

    let sim = Simulation::start(config).unwrap();
    // Stop between ticks so no timer races the stop
    let report = sim.run_for(Duration::from_millis(60_500)).await.unwrap();

    assert_eq!(report.agents, 5);
    assert_eq!(report.companies.len(), 2);
    assert_eq!(report.companies[0].company, CompanyId::new("C1"));
    assert_eq!(report.companies[1].company, CompanyId::new("C2"));
    assert!(report.elapsed_secs >= 60.5);

    for snapshot in &report.companies {
        assert!(snapshot.price >= MIN_PRICE);
        // Regulator ticks every 3s: 20 adjustments plus the opening price
        assert_eq!(snapshot.price_history.len(), 21);
        assert!(snapshot.trade_history.len() <= MAX_HISTORY);
        assert_eq!(snapshot.price_history.last().unwrap().price, snapshot.price);
    }
}

#[tokio::test(start_paused = true)]
async fn test_seeded_runs_are_reproducible() {
    let config = SimulationConfig::default()
        .with_seed(7)
        .with_info_traders(2)
        .with_trend_traders(2);

    let first = Simulation::start(config.clone())
        .unwrap()
        .run_for(Duration::from_millis(30_500))
        .await
        .unwrap();
    let second = Simulation::start(config)
        .unwrap()
        .run_for(Duration::from_millis(30_500))
        .await
        .unwrap();

    // Subscribers may hear a broadcast in any order, so compare what does
    // not depend on it
    for (a, b) in first.companies.iter().zip(&second.companies) {
        assert_eq!(a.price, b.price);
        assert_eq!(a.total_trades, b.total_trades);
        let prices = |s: &bourse_market::MarketSnapshot| {
            s.price_history.iter().map(|p| p.price).collect::<Vec<_>>()
        };
        assert_eq!(prices(a), prices(b));
    }
}

#[tokio::test(start_paused = true)]
async fn test_long_run_stays_bounded() {
    let config = SimulationConfig::new(
        vec![CompanyId::new("A"), CompanyId::new("B"), CompanyId::new("C")],
        dec!(20),
    )
    .with_seed(3)
    .with_info_traders(4)
    .with_trend_traders(6)
    .with_market(MarketConfig::default().with_max_history(10))
    .with_company(CompanyConfig::default().with_period_ms(500))
    .with_trend_trader(TrendTraderConfig::default().with_noise_probability(0.5));

    let report = Simulation::start(config)
        .unwrap()
        .run_for(Duration::from_millis(600_250))
        .await
        .unwrap();

    for snapshot in &report.companies {
        assert!(snapshot.price >= MIN_PRICE);
        assert!(snapshot.price_history.len() <= 10);
        assert!(snapshot.trade_history.len() <= 10);
        assert!(snapshot.trade_count_history.len() <= 10);
        if let Some(last) = snapshot.trade_count_history.last() {
            assert_eq!(last.count, snapshot.total_trades);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_updates_stream_while_running() {
    let sim = Simulation::start(SimulationConfig::default().with_seed(1)).unwrap();
    let mut updates = sim.market().subscribe();

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    // The regulator's first tick adjusts both companies
    let mut adjusted = Vec::new();
    while let Ok(update) = updates.try_recv() {
        if let MarketUpdate::PriceAdjusted { company, .. } = update {
            adjusted.push(company);
        }
    }
    assert!(adjusted.contains(&CompanyId::new("C1")));
    assert!(adjusted.contains(&CompanyId::new("C2")));

    sim.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_company_named_like_a_role_is_listed() {
    let config = SimulationConfig::new(
        vec![CompanyId::new("regulator"), CompanyId::new("info-trader-1")],
        dec!(100),
    )
    .with_seed(5);

    let sim = Simulation::start(config).unwrap();
    let agents = sim.agents();
    assert_eq!(agents.len(), 5);
    assert!(agents.contains(&AgentId::new("regulator")));
    assert!(agents.contains(&AgentId::new("company-regulator")));
    assert!(agents.contains(&AgentId::new("info-trader-1")));
    assert!(agents.contains(&AgentId::new("company-info-trader-1")));

    let report = sim.run_for(Duration::from_millis(3_500)).await.unwrap();
    assert_eq!(report.companies[0].company, CompanyId::new("regulator"));
    assert_eq!(report.companies[0].price_history.len(), 2);
}
