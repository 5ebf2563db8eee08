//! Company announcements
//!
//! Wire form is `"{company}:{outcome}"`, e.g. `C1:success`.

use bourse_core::CompanyId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result of a company's latest project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Fail,
    Risk,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Success, Outcome::Fail, Outcome::Risk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Fail => "fail",
            Outcome::Risk => "risk",
        }
    }

    /// Uniform draw over all outcomes
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Outcome::Success),
            "fail" => Ok(Outcome::Fail),
            "risk" => Ok(Outcome::Risk),
            other => Err(ParseEventError::UnknownOutcome(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("Missing ':' separator in '{0}'")]
    MissingSeparator(String),

    #[error("Empty company name in '{0}'")]
    EmptyCompany(String),

    #[error("Unknown outcome '{0}'")]
    UnknownOutcome(String),
}

/// A parsed announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyEvent {
    pub company: CompanyId,
    pub outcome: Outcome,
}

impl CompanyEvent {
    pub fn new(company: CompanyId, outcome: Outcome) -> Self {
        Self { company, outcome }
    }
}

impl fmt::Display for CompanyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.company, self.outcome)
    }
}

/// Strict parse: the text after the first `:` must be exactly one known
/// outcome. `C1:boom` and `C1:success:extra` are errors, so a trader drops
/// them without touching trust or trading.
impl FromStr for CompanyEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (company, outcome) = s
            .split_once(':')
            .ok_or_else(|| ParseEventError::MissingSeparator(s.to_string()))?;
        if company.is_empty() {
            return Err(ParseEventError::EmptyCompany(s.to_string()));
        }
        Ok(Self {
            company: CompanyId::new(company),
            outcome: outcome.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_and_display() {
        let event: CompanyEvent = "C1:success".parse().unwrap();
        assert_eq!(event, CompanyEvent::new(CompanyId::new("C1"), Outcome::Success));
        assert_eq!(event.to_string(), "C1:success");
    }

    #[test]
    fn test_parse_anomalies() {
        assert_eq!(
            "C1".parse::<CompanyEvent>().unwrap_err(),
            ParseEventError::MissingSeparator("C1".to_string())
        );
        assert_eq!(
            ":fail".parse::<CompanyEvent>().unwrap_err(),
            ParseEventError::EmptyCompany(":fail".to_string())
        );
        assert_eq!(
            "C1:boom".parse::<CompanyEvent>().unwrap_err(),
            ParseEventError::UnknownOutcome("boom".to_string())
        );
        assert_eq!(
            "C1:success:extra".parse::<CompanyEvent>().unwrap_err(),
            ParseEventError::UnknownOutcome("success:extra".to_string())
        );
    }

    #[test]
    fn test_draw_covers_all_outcomes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(Outcome::draw(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
