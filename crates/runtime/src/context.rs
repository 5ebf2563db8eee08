//! Handles an agent's behaviors use to reach the shared world

use bourse_core::{AgentId, Message, ServiceDescriptor};
use bourse_market::MarketState;
use bourse_messaging::{Directory, MessageRouter};
use std::sync::Arc;
use tokio::sync::watch;

/// Everything a behavior may touch besides its own state
///
/// Cheap to clone; every behavior of an agent gets its own copy.
#[derive(Clone)]
pub struct AgentContext {
    id: AgentId,
    market: Arc<MarketState>,
    router: Arc<MessageRouter>,
    stop: Arc<watch::Sender<bool>>,
}

impl AgentContext {
    pub fn new(
        id: AgentId,
        market: Arc<MarketState>,
        router: Arc<MessageRouter>,
        stop: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self {
            id,
            market,
            router,
            stop,
        }
    }

    /// Identity of the owning agent
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn market(&self) -> &Arc<MarketState> {
        &self.market
    }

    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }

    pub fn directory(&self) -> &Arc<Directory> {
        self.router.directory()
    }

    /// Advertise a service under this agent's identity
    pub fn register_service(&self, descriptor: &ServiceDescriptor) -> bool {
        self.directory().register(&self.id, descriptor)
    }

    /// Broadcast an `Inform` from this agent to every `service_type` provider
    pub fn inform_all(&self, content: impl Into<String>, service_type: &str) -> usize {
        let message = Message::inform(self.id.clone(), content);
        self.router.broadcast(&message, service_type)
    }

    /// Send a message to explicit receivers
    pub fn send<'a>(
        &self,
        message: &Message,
        receivers: impl IntoIterator<Item = &'a AgentId>,
    ) -> usize {
        self.router.send(message, receivers)
    }

    /// Ask every behavior of this agent to exit at its next suspension point
    pub fn stop_agent(&self) {
        self.stop.send_replace(true);
    }
}

impl std::fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentContext").field("id", &self.id).finish()
    }
}
