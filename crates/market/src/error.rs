use bourse_core::{CompanyId, Price};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Unknown company: {0}")]
    UnknownCompany(CompanyId),

    #[error("Company list is empty")]
    NoCompanies,

    #[error("Duplicate company: {0}")]
    DuplicateCompany(CompanyId),

    #[error("Initial price must be positive, got {0}")]
    NonPositivePrice(Price),

    #[error("Price floor must be positive, got {0}")]
    NonPositiveFloor(Price),

    #[error("History bound must be at least 1")]
    ZeroHistoryBound,
}

impl MarketError {
    /// True for errors raised while setting the market up
    pub fn is_configuration(&self) -> bool {
        !matches!(self, MarketError::UnknownCompany(_))
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
