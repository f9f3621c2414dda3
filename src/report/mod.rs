//! Report module
//!
//! Pure aggregation of ledger transactions into the three dashboard
//! artifacts: KPI summary, monthly rollups and the current-month
//! daily breakdown.

pub mod calendar;
mod daily;
mod kpi;
mod monthly;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::Transaction;

pub use daily::{build_daily_buckets, DailyBucket, DailyTransaction};
pub use kpi::{build_kpi_summary, moving_average, KpiSummary, FORECAST_WINDOW};
pub use monthly::{build_monthly_buckets, MonthlyBucket};

/// Everything the dashboard needs, computed in one pass over the ledger
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardReport {
    /// `None` when the ledger is empty
    pub kpi: Option<KpiSummary>,
    pub monthly: Vec<MonthlyBucket>,
    pub daily: Vec<DailyBucket>,
}

impl DashboardReport {
    /// KPI artifact as published. An empty ledger serializes as `{}`.
    pub fn kpi_document(&self) -> KpiDocument<'_> {
        KpiDocument(self.kpi.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}

/// Serializable view of the KPI summary
#[derive(Debug, Clone, Copy)]
pub struct KpiDocument<'a>(pub Option<&'a KpiSummary>);

impl Serialize for KpiDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(kpi) => kpi.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Aggregate the ledger relative to `today`.
///
/// An empty ledger produces an empty report rather than an error; the
/// daily list is only zero-filled when at least one transaction exists.
pub fn aggregate(transactions: &[Transaction], today: NaiveDate) -> DashboardReport {
    if transactions.is_empty() {
        return DashboardReport::default();
    }

    let monthly = build_monthly_buckets(transactions);
    let kpi = build_kpi_summary(transactions, &monthly, today);
    let daily = build_daily_buckets(transactions, today);

    tracing::debug!(
        months = monthly.len(),
        days = daily.len(),
        "Aggregated {} transactions",
        transactions.len()
    );

    DashboardReport { kpi, monthly, daily }
}
