//! Roles running together under the scheduler
//!
//! Time is paused; periods are exact and seeds make company outcomes
//! reproducible.

use bourse_agents::{
    CompanyAgent, CompanyConfig, CompanyEvent, InfoTrader, InfoTraderConfig, Outcome,
    RegulatorAgent, RegulatorConfig, TrendTrader, TrendTraderConfig,
};
use bourse_core::{AgentId, CompanyId, MAX_HISTORY, MIN_PRICE, Message, ServiceDescriptor};
use bourse_market::MarketState;
use bourse_messaging::{Directory, MessageRouter};
use bourse_runtime::{Agent, AgentContext, Behavior, Result, Scheduler};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn scheduler() -> Scheduler {
    let market = Arc::new(
        MarketState::init(vec![CompanyId::new("C1"), CompanyId::new("C2")], dec!(100)).unwrap(),
    );
    let router = Arc::new(MessageRouter::new(Arc::new(Directory::new())));
    Scheduler::new(market, router)
}

/// Event subscriber that just records what it hears
struct Probe {
    id: AgentId,
    heard: Arc<Mutex<Vec<String>>>,
}

impl Agent for Probe {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn agent_type(&self) -> &'static str {
        "Probe"
    }

    fn setup(&mut self, ctx: &AgentContext) -> Result<()> {
        ctx.register_service(&ServiceDescriptor::event_subscriber());
        Ok(())
    }

    fn behaviors(self: Box<Self>) -> Vec<Behavior> {
        let heard = self.heard;
        vec![Behavior::cyclic(
            move |message: Message, _: &AgentContext| -> Result<()> {
                heard.lock().unwrap().push(message.content);
                Ok(())
            },
        )]
    }
}

#[tokio::test(start_paused = true)]
async fn test_company_announces_seeded_outcomes() {
    let _ = env_logger::try_init();
    let mut scheduler = scheduler();
    let heard = Arc::new(Mutex::new(Vec::new()));
    scheduler
        .start(Probe {
            id: AgentId::new("probe"),
            heard: heard.clone(),
        })
        .unwrap();
    scheduler
        .start(CompanyAgent::with_seed(
            CompanyId::new("C1"),
            CompanyConfig::default(),
            99,
        ))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(15_500)).await;

    // First announcement is always "risk", the rest follow the seeded draws
    let mut rng = StdRng::seed_from_u64(99);
    let expected: Vec<String> = vec![
        "C1:risk".to_string(),
        format!("C1:{}", Outcome::draw(&mut rng)),
        format!("C1:{}", Outcome::draw(&mut rng)),
    ];
    assert_eq!(*heard.lock().unwrap(), expected);
    for content in heard.lock().unwrap().iter() {
        let event: CompanyEvent = content.parse().unwrap();
        assert_eq!(event.company, CompanyId::new("C1"));
    }

    scheduler.stop_all().await;
}

#[tokio::test(start_paused = true)]
async fn test_regulator_decays_idle_market() {
    let mut scheduler = scheduler();
    scheduler
        .start(RegulatorAgent::new("regulator", RegulatorConfig::default()))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(9_500)).await;

    let market = scheduler.market().clone();
    for company in market.companies() {
        assert_eq!(market.current_price(company).unwrap(), dec!(97));
        assert_eq!(market.price_history(company).unwrap().len(), 4);
    }
    scheduler.stop_all().await;
}

#[tokio::test(start_paused = true)]
async fn test_info_trader_buys_on_good_news() {
    let mut scheduler = scheduler();
    scheduler
        .start(InfoTrader::new("info-1", InfoTraderConfig::default()))
        .unwrap();

    let router = scheduler.router().clone();
    for _ in 0..3 {
        router.broadcast(
            &Message::inform(AgentId::new("C2"), "C2:success"),
            bourse_core::EVENT_SUBSCRIBER,
        );
    }
    tokio::time::sleep(Duration::from_millis(10)).await;

    let market = scheduler.market().clone();
    let trades = market.trade_history(&CompanyId::new("C2")).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].description, "info-1 BUY 5");

    scheduler.stop_all().await;
}

#[tokio::test(start_paused = true)]
async fn test_full_ensemble_keeps_market_invariants() {
    let _ = env_logger::try_init();
    let mut scheduler = scheduler();

    for (i, company) in ["C1", "C2"].into_iter().enumerate() {
        scheduler
            .start(CompanyAgent::with_seed(
                CompanyId::new(company),
                CompanyConfig::default(),
                i as u64,
            ))
            .unwrap();
    }
    scheduler
        .start(RegulatorAgent::new("regulator", RegulatorConfig::default()))
        .unwrap();
    for i in 0..3 {
        scheduler
            .start(InfoTrader::new(
                format!("info-{}", i).as_str(),
                InfoTraderConfig::default(),
            ))
            .unwrap();
        scheduler
            .start(TrendTrader::with_seed(
                format!("trend-{}", i).as_str(),
                TrendTraderConfig::default(),
                100 + i as u64,
            ))
            .unwrap();
    }
    assert_eq!(scheduler.agent_count(), 9);

    tokio::time::sleep(Duration::from_secs(120)).await;

    let market = scheduler.market().clone();
    for snapshot in market.snapshot_all().unwrap() {
        assert!(snapshot.price >= MIN_PRICE);
        assert!(snapshot.price_history.len() <= MAX_HISTORY);
        assert!(snapshot.trade_history.len() <= MAX_HISTORY);
        assert!(snapshot.trade_count_history.len() <= MAX_HISTORY);
        for trade in &snapshot.trade_history {
            let words: Vec<&str> = trade.description.split(' ').collect();
            assert_eq!(words.len(), 3, "bad trade record {}", trade.description);
            assert!(words[1] == "BUY" || words[1] == "SELL");
            assert!(words[2].parse::<u32>().is_ok());
        }
    }

    assert_eq!(scheduler.stop_all().await, 9);
    assert!(
        scheduler
            .router()
            .directory()
            .find_by_type(bourse_core::EVENT_SUBSCRIBER)
            .is_empty()
    );
}
