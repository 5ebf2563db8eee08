//! Scheduler - runs every agent's behaviors concurrently
//!
//! One tokio task per behavior. Each agent owns a `watch` stop signal shared
//! by its behaviors and its mailbox; stopping flips the signal and the tasks
//! exit at their next suspension point.

use bourse_core::{AgentId, Message};
use bourse_market::MarketState;
use bourse_messaging::{Mailbox, MessageRouter, Received};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::agent::Agent;
use crate::behavior::{Behavior, MessageHandler, TickHandler};
use crate::context::AgentContext;
use crate::error::{Result, RuntimeError};

/// Bookkeeping for one running agent
struct RunningAgent {
    id: AgentId,
    agent_type: &'static str,
    stop: Arc<watch::Sender<bool>>,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningAgent {
    fn is_finished(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }
}

/// Starts agents and drives their behaviors until stopped
///
/// Must be used from within a tokio runtime.
pub struct Scheduler {
    market: Arc<MarketState>,
    router: Arc<MessageRouter>,
    agents: Vec<RunningAgent>,
}

impl Scheduler {
    pub fn new(market: Arc<MarketState>, router: Arc<MessageRouter>) -> Self {
        Self {
            market,
            router,
            agents: Vec::new(),
        }
    }

    pub fn market(&self) -> &Arc<MarketState> {
        &self.market
    }

    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }

    /// Start an agent: set it up, then begin all of its behaviors
    ///
    /// Rejects a duplicate identity, a non-positive ticker period and more
    /// than one cyclic behavior. A rejected agent leaves no trace in the
    /// router or the directory.
    pub fn start<A: Agent>(&mut self, agent: A) -> Result<AgentId> {
        self.start_boxed(Box::new(agent))
    }

    pub fn start_boxed(&mut self, mut agent: Box<dyn Agent>) -> Result<AgentId> {
        let id = agent.id().clone();
        let agent_type = agent.agent_type();

        if self.agents.iter().any(|a| a.id == id) {
            return Err(RuntimeError::DuplicateAgent(id));
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let stop = Arc::new(stop_tx);
        let (postbox, mailbox) = Mailbox::channel(id.clone(), stop_rx.clone());
        self.router.register_mailbox(postbox)?;

        let ctx = AgentContext::new(
            id.clone(),
            self.market.clone(),
            self.router.clone(),
            stop.clone(),
        );

        let behaviors = match agent
            .setup(&ctx)
            .map(|()| agent.behaviors())
            .and_then(|behaviors| validate(&id, behaviors))
        {
            Ok(behaviors) => behaviors,
            Err(e) => {
                self.teardown(&id);
                return Err(e);
            }
        };

        let mut mailbox = Some(mailbox);
        let mut tasks = Vec::with_capacity(behaviors.len());
        for behavior in behaviors {
            log::debug!("[{}] Starting {:?}", id, behavior);
            let task = match behavior {
                Behavior::Ticker { period, handler } => tokio::spawn(run_ticker(
                    ctx.clone(),
                    period,
                    handler,
                    stop_rx.clone(),
                )),
                Behavior::Cyclic { handler } => match mailbox.take() {
                    Some(mailbox) => tokio::spawn(run_cyclic(ctx.clone(), handler, mailbox)),
                    // validate() allows a single cyclic behavior
                    None => continue,
                },
            };
            tasks.push(task);
        }

        // Without a cyclic behavior nobody reads the mailbox: close it so
        // messages sent to this agent are dropped instead of queued forever
        if let Some(mut mailbox) = mailbox {
            mailbox.close();
        }

        log::info!(
            "[{}] {} started with {} behavior(s)",
            id,
            agent_type,
            tasks.len()
        );

        self.agents.push(RunningAgent {
            id: id.clone(),
            agent_type,
            stop,
            tasks,
        });
        Ok(id)
    }

    /// Stop one agent and wait for its behaviors to exit
    pub async fn stop(&mut self, id: &AgentId) -> Result<()> {
        let index = self
            .agents
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| RuntimeError::UnknownAgent(id.clone()))?;

        let agent = self.agents.remove(index);
        agent.stop.send_replace(true);
        self.join(agent).await;
        Ok(())
    }

    /// Stop every agent and wait until all behaviors have exited
    ///
    /// Messages still queued are discarded. Returns how many agents were
    /// stopped.
    pub async fn stop_all(&mut self) -> usize {
        // Signal everyone first so agents wind down concurrently
        for agent in &self.agents {
            agent.stop.send_replace(true);
        }

        let agents = std::mem::take(&mut self.agents);
        let count = agents.len();
        for agent in agents {
            self.join(agent).await;
        }

        log::info!("Scheduler stopped {} agent(s)", count);
        count
    }

    async fn join(&self, agent: RunningAgent) {
        for task in agent.tasks {
            if let Err(e) = task.await {
                log::error!("[{}] Behavior task failed: {}", agent.id, e);
            }
        }
        self.teardown(&agent.id);
        log::info!("[{}] {} stopped", agent.id, agent.agent_type);
    }

    fn teardown(&self, id: &AgentId) {
        self.router.remove_mailbox(id);
        self.router.directory().deregister_agent(id);
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Identities of started agents, in start order
    pub fn agents(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id.clone()).collect()
    }

    /// Whether `id` was started and still has a live behavior
    pub fn is_running(&self, id: &AgentId) -> bool {
        self.agents
            .iter()
            .any(|a| &a.id == id && !a.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for agent in &self.agents {
            agent.stop.send_replace(true);
        }
    }
}

fn validate(id: &AgentId, behaviors: Vec<Behavior>) -> Result<Vec<Behavior>> {
    let mut cyclic = 0;
    for behavior in &behaviors {
        match behavior {
            Behavior::Ticker { period, .. } if period.is_zero() => {
                return Err(RuntimeError::NonPositivePeriod {
                    agent: id.clone(),
                    period: *period,
                });
            }
            Behavior::Ticker { .. } => {}
            Behavior::Cyclic { .. } => cyclic += 1,
        }
    }
    if cyclic > 1 {
        return Err(RuntimeError::MultipleCyclic(id.clone()));
    }
    Ok(behaviors)
}

/// Fire `handler` once per period until stopped
///
/// The first tick lands one full period after start. Ticks run one at a
/// time; a tick that overruns its period delays the next one.
async fn run_ticker(
    ctx: AgentContext,
    period: Duration,
    mut handler: Box<dyn TickHandler>,
    mut stop: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    loop {
        if *stop.borrow_and_update() {
            break;
        }

        tokio::select! {
            biased;

            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }

            _ = interval.tick() => {
                ticks += 1;
                if let Err(e) = handler.on_tick(&ctx) {
                    log::error!("[{}] Tick {} failed, stopping agent: {}", ctx.id(), ticks, e);
                    ctx.stop_agent();
                    break;
                }
            }
        }
    }

    log::debug!("[{}] Ticker ({:?}) exited after {} tick(s)", ctx.id(), period, ticks);
}

/// Hand each mailbox message to `handler` until stopped
async fn run_cyclic(ctx: AgentContext, mut handler: Box<dyn MessageHandler>, mut mailbox: Mailbox) {
    let mut handled: u64 = 0;

    while let Received::Message(message) = mailbox.receive().await {
        handled += 1;
        if let Err(e) = handle_message(&mut *handler, message, &ctx) {
            log::error!("[{}] Message handling failed, stopping agent: {}", ctx.id(), e);
            ctx.stop_agent();
            break;
        }
    }

    mailbox.close();
    log::debug!("[{}] Cyclic exited after {} message(s)", ctx.id(), handled);
}

fn handle_message(
    handler: &mut dyn MessageHandler,
    message: Message,
    ctx: &AgentContext,
) -> Result<()> {
    log::trace!(
        "[{}] <- {:?} from {}: {}",
        ctx.id(),
        message.performative,
        message.sender,
        message.content
    );
    handler.on_message(message, ctx)
}
