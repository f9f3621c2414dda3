//! Publish module
//!
//! Writes artifacts as pretty-printed JSON files into the output
//! directory served by the static dashboard.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// KPI card data
pub const KPI_SUMMARY_FILE: &str = "kpi_summary.json";

/// Monthly rollups
pub const MONTHLY_SUMMARY_FILE: &str = "monthly_summary.json";

/// Current-month daily breakdown
pub const CURRENT_MONTH_DAILY_FILE: &str = "current_month_daily.json";

/// Writes artifacts to a directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory (and parents) if missing
    pub async fn prepare(&self) -> Result<(), PublishError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| PublishError::Io {
                path: self.output_dir.clone(),
                source,
            })
    }

    /// Serialize `document` and write it to `file_name`, replacing any
    /// previous version.
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        document: &T,
    ) -> Result<PathBuf, PublishError> {
        let path = self.output_dir.join(file_name);
        let body = to_pretty_json(document)?;

        tokio::fs::write(&path, body)
            .await
            .map_err(|source| PublishError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Wrote artifact");
        Ok(path)
    }
}

/// Pretty JSON with 2-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(document: &T) -> Result<String, PublishError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Publish errors
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
