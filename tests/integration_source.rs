//! Integration tests for the Postgres transaction source
//!
//! These tests require a database connection.
//! Run with: DATABASE_URL=... cargo test -- --ignored
//!
//! Every test recreates the same table, so they live in one test function
//! to keep them from racing each other.

use dashboard_etl::report::aggregate;
use dashboard_etl::{PgTransactionSource, TransactionSource, TransactionType};
use rust_decimal_macros::dec;
use sqlx::PgPool;

mod common;

async fn assert_seeded_ledger(pool: PgPool) {
    let source = PgTransactionSource::new(pool);

    source.verify().await.unwrap();
    let transactions = source.fetch_transactions().await.unwrap();
    assert_eq!(transactions.len(), 4);
    assert_eq!(transactions[0].date, common::date(2024, 1, 5));
    assert_eq!(transactions[0].amount.value(), dec!(1000));
    assert_eq!(transactions[1].kind, TransactionType::Expense);
    assert_eq!(transactions[1].description, "");

    let report = aggregate(&transactions, common::date(2024, 2, 20));
    assert_eq!(report.monthly[0].net, dec!(600));
    assert_eq!(report.monthly[1].net, dec!(900));
    assert!(report.monthly[1].is_highest_net);

    source.close().await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_fetch_from_read_model() {
    assert_seeded_ledger(common::setup_test_db().await).await;

    // Amounts stored as non-numeric column types are cast on read
    for amount_type in ["DOUBLE PRECISION", "INTEGER", "BIGINT", "TEXT"] {
        let pool = common::setup_test_db_with_amount_type(amount_type).await;
        assert_seeded_ledger(pool).await;
    }
}
