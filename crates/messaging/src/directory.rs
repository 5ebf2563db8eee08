//! Service directory (yellow pages)

use bourse_core::{AgentId, ServiceDescriptor};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

/// Capability registry: service type -> agents offering it
///
/// Keyed by service type so a lookup touches a single shard. Each agent maps
/// to the set of service names it registered under that type.
pub struct Directory {
    by_type: DashMap<String, HashMap<AgentId, HashSet<String>>>,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            by_type: DashMap::new(),
        }
    }

    /// Advertise `descriptor` for `agent`
    ///
    /// Idempotent: registering the same pair twice is a no-op. Returns whether
    /// the registration was new.
    pub fn register(&self, agent: &AgentId, descriptor: &ServiceDescriptor) -> bool {
        let added = self
            .by_type
            .entry(descriptor.service_type.clone())
            .or_default()
            .entry(agent.clone())
            .or_default()
            .insert(descriptor.service_name.clone());

        if added {
            log::debug!(
                "[{}] Registered service {} ({})",
                agent,
                descriptor.service_type,
                descriptor.service_name
            );
        }
        added
    }

    /// Withdraw one descriptor of `agent`; returns whether it was registered
    pub fn deregister(&self, agent: &AgentId, descriptor: &ServiceDescriptor) -> bool {
        let Some(mut agents) = self.by_type.get_mut(&descriptor.service_type) else {
            return false;
        };

        let removed = match agents.get_mut(agent) {
            Some(names) => {
                let removed = names.remove(&descriptor.service_name);
                if names.is_empty() {
                    agents.remove(agent);
                }
                removed
            }
            None => false,
        };
        let now_empty = agents.is_empty();
        drop(agents);

        if now_empty {
            self.by_type
                .remove_if(&descriptor.service_type, |_, agents| agents.is_empty());
        }
        if removed {
            log::debug!(
                "[{}] Deregistered service {} ({})",
                agent,
                descriptor.service_type,
                descriptor.service_name
            );
        }
        removed
    }

    /// Withdraw every descriptor of `agent`; returns how many were removed
    pub fn deregister_agent(&self, agent: &AgentId) -> usize {
        let mut removed = 0;
        self.by_type.retain(|_, agents| {
            if let Some(names) = agents.remove(agent) {
                removed += names.len();
            }
            !agents.is_empty()
        });
        removed
    }

    /// Every agent currently registered under `service_type`
    ///
    /// Never blocks on registrations of other service types. Order is not
    /// meaningful.
    pub fn find_by_type(&self, service_type: &str) -> HashSet<AgentId> {
        self.by_type
            .get(service_type)
            .map(|agents| agents.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
