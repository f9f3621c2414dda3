//! Monthly rollups
//!
//! One bucket per calendar month present in the ledger, with the
//! best and worst month by net flagged.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionType};

/// Income/expense totals for a single calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub is_highest_net: bool,
    pub is_lowest_net: bool,
}

impl MonthlyBucket {
    fn new(year: i32, month: u32, income: Decimal, expense: Decimal) -> Self {
        Self {
            year,
            month,
            income,
            expense,
            net: income - expense,
            is_highest_net: false,
            is_lowest_net: false,
        }
    }
}

#[derive(Default)]
struct Totals {
    income: Decimal,
    expense: Decimal,
}

/// Group transactions by (year, month) and sum them.
///
/// Buckets come back in ascending chronological order with the highest
/// and lowest net flagged. Input order does not matter.
pub fn build_monthly_buckets(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut groups: BTreeMap<(i32, u32), Totals> = BTreeMap::new();

    for tx in transactions {
        let totals = groups.entry(tx.year_month()).or_default();
        match tx.kind {
            TransactionType::Income => totals.income += tx.amount.value(),
            TransactionType::Expense => totals.expense += tx.amount.value(),
        }
    }

    let mut buckets: Vec<MonthlyBucket> = groups
        .into_iter()
        .map(|((year, month), totals)| {
            MonthlyBucket::new(year, month, totals.income, totals.expense)
        })
        .collect();

    if let Some((highest, lowest)) = net_extremes(&buckets) {
        buckets[highest].is_highest_net = true;
        buckets[lowest].is_lowest_net = true;
    }

    buckets
}

/// Indices of the highest and lowest net. Earliest bucket wins ties.
pub(crate) fn net_extremes(buckets: &[MonthlyBucket]) -> Option<(usize, usize)> {
    let first = buckets.first()?;
    let (mut highest, mut lowest) = (0, 0);
    let (mut max_net, mut min_net) = (first.net, first.net);

    for (idx, bucket) in buckets.iter().enumerate().skip(1) {
        if bucket.net > max_net {
            max_net = bucket.net;
            highest = idx;
        }
        if bucket.net < min_net {
            min_net = bucket.net;
            lowest = idx;
        }
    }

    Some((highest, lowest))
}
