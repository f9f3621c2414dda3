//! Current-month daily expense breakdown

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::days_in_month;
use crate::domain::Transaction;

/// Tooltip line for a single expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTransaction {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

/// Expense total for one day of the current month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub day: u32,
    pub amount: Decimal,
    pub transactions: Vec<DailyTransaction>,
}

impl DailyBucket {
    fn empty(day: u32) -> Self {
        Self {
            day,
            amount: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }
}

/// Build one bucket per calendar day of `today`'s month.
///
/// Only expense transactions dated in that month are counted. Days
/// without expenses are zero-filled so the chart has no gaps.
pub fn build_daily_buckets(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyBucket> {
    let Some(last_day) = days_in_month(today.year(), today.month()) else {
        return Vec::new();
    };

    let mut by_day: BTreeMap<u32, DailyBucket> =
        (1..=last_day).map(|day| (day, DailyBucket::empty(day))).collect();

    let current_month = transactions.iter().filter(|tx| {
        tx.is_expense() && tx.date.year() == today.year() && tx.date.month() == today.month()
    });

    for tx in current_month {
        if let Some(bucket) = by_day.get_mut(&tx.date.day()) {
            bucket.amount += tx.amount.value();
            bucket.transactions.push(DailyTransaction {
                description: tx.description.clone(),
                amount: tx.amount.value(),
                category: tx.category.clone(),
            });
        }
    }

    by_day.into_values().collect()
}
