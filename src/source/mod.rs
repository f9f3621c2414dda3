//! Transaction source
//!
//! Where the ledger rows come from. The pipeline only depends on the
//! `TransactionSource` trait; `PgTransactionSource` reads the Postgres
//! read model.

mod repository;

use std::future::Future;

use crate::domain::{DomainError, Transaction};

pub use repository::{PgTransactionSource, TransactionRow};

/// Supplies the full ledger for a run
pub trait TransactionSource {
    /// Fetch every transaction. Ordering is not relied upon.
    fn fetch_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, SourceError>> + Send;
}

/// Source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Required table '{0}' does not exist")]
    SchemaMissing(&'static str),

    #[error("Invalid transaction row dated {date}: {source}")]
    InvalidRow {
        date: chrono::NaiveDate,
        #[source]
        source: DomainError,
    },
}
