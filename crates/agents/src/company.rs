//! Company agent - periodic project announcements

use bourse_core::{AgentId, CompanyId, EVENT_SUBSCRIBER};
use bourse_runtime::{Agent, AgentContext, Behavior, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::CompanyConfig;
use crate::event::{CompanyEvent, Outcome};

/// Announces `"{company}:{outcome}"` to every event subscriber each period,
/// then draws the outcome it will announce next.
pub struct CompanyAgent {
    id: AgentId,
    company: CompanyId,
    config: CompanyConfig,
    next: Outcome,
    rng: StdRng,
}

impl CompanyAgent {
    /// The agent is identified as `company-{company}`
    pub fn new(company: CompanyId, config: CompanyConfig) -> Self {
        Self::with_rng(company, config, StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible announcements
    pub fn with_seed(company: CompanyId, config: CompanyConfig, seed: u64) -> Self {
        Self::with_rng(company, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(company: CompanyId, config: CompanyConfig, rng: StdRng) -> Self {
        Self {
            id: AgentId::for_company(&company),
            company,
            config,
            next: Outcome::Risk,
            rng,
        }
    }

    pub fn company(&self) -> &CompanyId {
        &self.company
    }

    /// Outcome the next tick will announce
    pub fn next_outcome(&self) -> Outcome {
        self.next
    }

    /// Announce the pending outcome and draw the following one
    pub fn announce(&mut self, ctx: &AgentContext) -> Result<usize> {
        let event = CompanyEvent::new(self.company.clone(), self.next);
        let reached = ctx.inform_all(event.to_string(), EVENT_SUBSCRIBER);
        log::info!("[{}] Announces {} to {} subscriber(s)", self.id, event, reached);

        self.next = Outcome::draw(&mut self.rng);
        Ok(reached)
    }
}

impl Agent for CompanyAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn agent_type(&self) -> &'static str {
        "Company"
    }

    fn behaviors(mut self: Box<Self>) -> Vec<Behavior> {
        let period = self.config.period();
        vec![Behavior::ticker(period, move |ctx: &AgentContext| {
            self.announce(ctx).map(|_| ())
        })]
    }
}
