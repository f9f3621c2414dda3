//! Domain module
//!
//! Core ledger types consumed by the aggregator.

pub mod amount;
pub mod error;
pub mod transaction;

pub use amount::{Amount, AmountError};
pub use error::DomainError;
pub use transaction::{Transaction, TransactionType};
