//! KPI summary
//!
//! Headline figures for the dashboard cards: latest and previous month,
//! calendar year to date, best/worst month and a next-month forecast.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::monthly::{net_extremes, MonthlyBucket};
use crate::domain::{Transaction, TransactionType};

/// Number of trailing months averaged for the forecast
pub const FORECAST_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_income_current_month: Decimal,
    pub total_expense_current_month: Decimal,
    pub total_income_last_month: Decimal,
    pub total_expense_last_month: Decimal,
    pub highest_month: MonthlyBucket,
    pub lowest_month: MonthlyBucket,
    pub forecast_next_month_income: Decimal,
    pub forecast_next_month_expense: Decimal,
    pub total_income_current_year: Decimal,
    pub total_expense_current_year: Decimal,
    pub total_income_last_year: Decimal,
    pub total_expense_last_year: Decimal,
}

/// Build the KPI summary.
///
/// "Current month" is the latest month in `buckets`; the yearly totals use
/// `today`'s calendar year. Returns `None` when there are no buckets.
pub fn build_kpi_summary(
    transactions: &[Transaction],
    buckets: &[MonthlyBucket],
    today: NaiveDate,
) -> Option<KpiSummary> {
    let latest = buckets.last()?;
    let previous = buckets.len().checked_sub(2).and_then(|idx| buckets.get(idx));
    let (highest, lowest) = net_extremes(buckets)?;

    let current_year = today.year();
    let last_year = current_year - 1;
    let total = |year, kind| year_total(transactions, year, kind);

    Some(KpiSummary {
        total_income_current_month: latest.income,
        total_expense_current_month: latest.expense,
        total_income_last_month: previous.map_or(Decimal::ZERO, |b| b.income),
        total_expense_last_month: previous.map_or(Decimal::ZERO, |b| b.expense),
        highest_month: buckets[highest].clone(),
        lowest_month: buckets[lowest].clone(),
        forecast_next_month_income: moving_average(buckets, |b| b.income),
        forecast_next_month_expense: moving_average(buckets, |b| b.expense),
        total_income_current_year: total(current_year, TransactionType::Income),
        total_expense_current_year: total(current_year, TransactionType::Expense),
        total_income_last_year: total(last_year, TransactionType::Income),
        total_expense_last_year: total(last_year, TransactionType::Expense),
    })
}

/// Mean of the last `FORECAST_WINDOW` values (or all of them, if fewer)
pub fn moving_average<F>(buckets: &[MonthlyBucket], value: F) -> Decimal
where
    F: Fn(&MonthlyBucket) -> Decimal,
{
    let window = &buckets[buckets.len().saturating_sub(FORECAST_WINDOW)..];
    if window.is_empty() {
        return Decimal::ZERO;
    }

    let sum: Decimal = window.iter().map(value).sum();
    sum / Decimal::from(window.len())
}

/// Sum of amounts of one type over a calendar year
fn year_total(transactions: &[Transaction], year: i32, kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.date.year() == year && tx.kind == kind)
        .map(|tx| tx.amount.value())
        .sum()
}
