//! Amount type
//!
//! Domain primitive for transaction amounts read from the ledger.
//! Amounts are validated at construction time, so a negative value can
//! never reach the aggregator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount represents a validated, non-negative monetary value.
///
/// Precision is whatever the read model stores; only the sign is checked.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use dashboard_etl::domain::Amount;
///
/// let amount = Amount::new(Decimal::new(4250, 2)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(4250, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }

        Ok(Self(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}
