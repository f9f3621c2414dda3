//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

/// Default artifact directory, served by the static dashboard
pub const DEFAULT_OUTPUT_DIR: &str = "public/data";

/// ETL configuration
#[derive(Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Password used to encrypt artifacts. `None` disables encryption.
    pub dashboard_password: Option<String>,

    /// Directory the artifacts are written to
    pub output_dir: PathBuf,

    /// Reference date for "current month/year". Defaults to today.
    pub report_date: Option<NaiveDate>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "2".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        // An empty password is treated the same as an unset one
        let dashboard_password = lookup("DASHBOARD_PASSWORD").filter(|p| !p.is_empty());

        let output_dir: PathBuf = lookup("OUTPUT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
            .into();

        let report_date = lookup("REPORT_DATE")
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidValue("REPORT_DATE"))
            })
            .transpose()?;

        Ok(Self {
            database_url,
            database_max_connections,
            dashboard_password,
            output_dir,
            report_date,
        })
    }

    /// Check if artifacts will be encrypted
    pub fn is_encryption_enabled(&self) -> bool {
        self.dashboard_password.is_some()
    }

    /// Password as passed to the encryptor
    pub fn password(&self) -> Option<&str> {
        self.dashboard_password.as_deref()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field(
                "dashboard_password",
                &self.dashboard_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("output_dir", &self.output_dir)
            .field("report_date", &self.report_date)
            .finish()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
