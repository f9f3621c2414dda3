//! ETL pipeline
//!
//! Fetch -> aggregate -> seal -> write, strictly in that order. The first
//! failure aborts the run; artifacts already written are left in place.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::crypto::seal;
use crate::error::EtlResult;
use crate::publish::{
    ArtifactWriter, CURRENT_MONTH_DAILY_FILE, KPI_SUMMARY_FILE, MONTHLY_SUMMARY_FILE,
};
use crate::report::{aggregate, DashboardReport};
use crate::source::TransactionSource;

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub report_date: NaiveDate,
    pub transactions_fetched: usize,
    pub months: usize,
    pub days: usize,
    pub encrypted: bool,
    pub artifacts_written: Vec<PathBuf>,
    pub completed_at: DateTime<Utc>,
}

/// Reference date for a run: the configured override, else today
pub fn reference_date(config: &Config) -> NaiveDate {
    config
        .report_date
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Run the ETL once against `source`.
pub async fn run<S: TransactionSource>(config: &Config, source: &S) -> EtlResult<RunReport> {
    let report_date = reference_date(config);

    tracing::info!("Fetching transactions...");
    let transactions = source.fetch_transactions().await?;
    tracing::info!(count = transactions.len(), "Fetched transactions");

    if transactions.is_empty() {
        tracing::warn!("No transactions found; writing empty artifacts");
    }

    tracing::info!(%report_date, "Processing data...");
    let report = aggregate(&transactions, report_date);

    tracing::info!("Encrypting and writing output files...");
    let writer = ArtifactWriter::new(config.output_dir.clone());
    let artifacts_written = publish(&report, config.password(), &writer).await?;

    Ok(RunReport {
        report_date,
        transactions_fetched: transactions.len(),
        months: report.monthly.len(),
        days: report.daily.len(),
        encrypted: config.is_encryption_enabled(),
        artifacts_written,
        completed_at: Utc::now(),
    })
}

/// Seal and write the three artifacts in a fixed order.
pub async fn publish(
    report: &DashboardReport,
    password: Option<&str>,
    writer: &ArtifactWriter,
) -> EtlResult<Vec<PathBuf>> {
    writer.prepare().await?;

    let kpi = report.kpi_document();
    let written = vec![
        seal_and_write(writer, KPI_SUMMARY_FILE, &kpi, password).await?,
        seal_and_write(writer, MONTHLY_SUMMARY_FILE, &report.monthly, password).await?,
        seal_and_write(writer, CURRENT_MONTH_DAILY_FILE, &report.daily, password).await?,
    ];

    Ok(written)
}

async fn seal_and_write<T: Serialize>(
    writer: &ArtifactWriter,
    file_name: &str,
    artifact: &T,
    password: Option<&str>,
) -> EtlResult<PathBuf> {
    // Nothing touches the disk unless sealing succeeded
    let sealed = seal(artifact, password)?;
    tracing::debug!(file = file_name, encrypted = sealed.is_encrypted(), "Sealed artifact");

    Ok(writer.write_json(file_name, &sealed).await?)
}
