//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent values the payments API would never accept.
/// These are independent of transport and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid bank account type: {0}")]
    InvalidBankAccountType(String),

    #[error("Invalid environment: {0} (expected production or sandbox)")]
    InvalidEnvironment(String),
}
