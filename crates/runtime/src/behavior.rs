//! Behaviors - recurring units of work bound to one agent

use bourse_core::Message;
use std::time::Duration;

use crate::context::AgentContext;
use crate::error::Result;

/// Work fired on every tick of a [`Behavior::Ticker`]
///
/// Returning an error stops the owning agent.
pub trait TickHandler: Send + 'static {
    fn on_tick(&mut self, ctx: &AgentContext) -> Result<()>;
}

/// Work run for every message taken by a [`Behavior::Cyclic`]
///
/// Returning an error stops the owning agent.
pub trait MessageHandler: Send + 'static {
    fn on_message(&mut self, message: Message, ctx: &AgentContext) -> Result<()>;
}

impl<F> TickHandler for F
where
    F: FnMut(&AgentContext) -> Result<()> + Send + 'static,
{
    fn on_tick(&mut self, ctx: &AgentContext) -> Result<()> {
        self(ctx)
    }
}

impl<F> MessageHandler for F
where
    F: FnMut(Message, &AgentContext) -> Result<()> + Send + 'static,
{
    fn on_message(&mut self, message: Message, ctx: &AgentContext) -> Result<()> {
        self(message, ctx)
    }
}

/// A unit of recurring work the scheduler drives
pub enum Behavior {
    /// Fires `handler` once per `period`, first one period after start
    Ticker {
        period: Duration,
        handler: Box<dyn TickHandler>,
    },
    /// Blocks on the agent's mailbox and hands each message to `handler`
    Cyclic { handler: Box<dyn MessageHandler> },
}

impl Behavior {
    pub fn ticker(period: Duration, handler: impl TickHandler) -> Self {
        Behavior::Ticker {
            period,
            handler: Box::new(handler),
        }
    }

    pub fn cyclic(handler: impl MessageHandler) -> Self {
        Behavior::Cyclic {
            handler: Box::new(handler),
        }
    }

    /// Behavior kind name (for logging)
    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Ticker { .. } => "ticker",
            Behavior::Cyclic { .. } => "cyclic",
        }
    }

    pub fn period(&self) -> Option<Duration> {
        match self {
            Behavior::Ticker { period, .. } => Some(*period),
            Behavior::Cyclic { .. } => None,
        }
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Ticker { period, .. } => {
                f.debug_struct("Ticker").field("period", period).finish()
            }
            Behavior::Cyclic { .. } => f.debug_struct("Cyclic").finish(),
        }
    }
}
