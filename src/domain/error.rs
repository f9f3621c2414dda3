//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::AmountError;

/// Errors raised when a ledger row cannot be represented as a `Transaction`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Type column was neither `income` nor `expense`
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),

    /// Amount failed validation
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
}
