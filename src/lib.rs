//! dashboard_etl Library
//!
//! Re-exports modules for integration testing and the binaries.

pub mod config;
pub mod crypto;
pub mod db;
pub mod domain;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod source;

mod error;

pub use config::{Config, ConfigError};
pub use crypto::{CryptoError, EncryptedArtifact, Sealed};
pub use domain::{Amount, AmountError, DomainError, Transaction, TransactionType};
pub use error::{EtlError, EtlResult};
pub use pipeline::RunReport;
pub use report::{DailyBucket, DashboardReport, KpiSummary, MonthlyBucket};
pub use source::{PgTransactionSource, SourceError, TransactionSource};
