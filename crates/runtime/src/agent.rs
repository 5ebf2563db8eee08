//! Agent Trait
//!
//! Core trait every market participant implements.

use bourse_core::AgentId;

use crate::behavior::Behavior;
use crate::context::AgentContext;
use crate::error::Result;

/// A market participant
///
/// The scheduler calls [`Agent::setup`] once (directory registration and the
/// like), then consumes the agent through [`Agent::behaviors`]; the returned
/// behaviors own whatever agent state they need from then on.
pub trait Agent: Send + 'static {
    /// Get agent's unique identifier
    fn id(&self) -> &AgentId;

    /// Get agent type name (for logging/metrics)
    fn agent_type(&self) -> &'static str;

    /// One-time initialization before any behavior runs
    fn setup(&mut self, ctx: &AgentContext) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Hand the agent's state over to its behaviors
    fn behaviors(self: Box<Self>) -> Vec<Behavior>;
}
