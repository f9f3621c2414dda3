//! Error handling module
//!
//! Top-level error type for an ETL run. Every variant is fatal.

use crate::config::ConfigError;
use crate::crypto::CryptoError;
use crate::publish::PublishError;
use crate::source::SourceError;

/// ETL-wide Result type
pub type EtlResult<T> = Result<T, EtlError>;

/// ETL error types
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Encryption error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Write error: {0}")]
    Publish(#[from] PublishError),
}

impl From<sqlx::Error> for EtlError {
    fn from(err: sqlx::Error) -> Self {
        EtlError::Source(SourceError::Database(err))
    }
}

impl EtlError {
    /// Short stage label used in logs
    pub fn stage(&self) -> &'static str {
        match self {
            EtlError::Config(_) => "config",
            EtlError::Source(_) => "fetch",
            EtlError::Crypto(_) => "encrypt",
            EtlError::Publish(_) => "write",
        }
    }
}
