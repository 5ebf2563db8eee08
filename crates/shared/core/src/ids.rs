//! Identifiers for companies and agents

use serde::{Deserialize, Serialize};

/// Identifier of a listed company (e.g. `C1`)
///
/// Set once at simulation start and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub String);

impl CompanyId {
    /// Create a new company ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CompanyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity of a running agent
///
/// Unique within one simulation; used as the directory and mailbox key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AgentId {
    /// Identity of the agent announcing for `company`
    ///
    /// Prefixed so that any company name can be listed without colliding
    /// with the fixed trader and regulator identities.
    pub fn for_company(company: &CompanyId) -> Self {
        Self(format!("company-{}", company.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_id_display() {
        let id = CompanyId::new("C1");
        assert_eq!(id.to_string(), "C1");
        assert_eq!(id.as_str(), "C1");
        assert_eq!(CompanyId::from("C1"), id);
    }

    #[test]
    fn test_company_agent_identity() {
        assert_eq!(AgentId::for_company(&CompanyId::new("C2")), AgentId::new("company-C2"));
        assert_ne!(
            AgentId::for_company(&CompanyId::new("regulator")),
            AgentId::new("regulator")
        );
    }
}
