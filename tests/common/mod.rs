//! Common test utilities

#![allow(dead_code)]

use chrono::NaiveDate;
use dashboard_etl::{
    Amount, Config, SourceError, Transaction, TransactionSource, TransactionType,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// In-memory ledger
pub struct StaticSource(pub Vec<Transaction>);

impl TransactionSource for StaticSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, SourceError> {
        Ok(self.0.clone())
    }
}

/// Source that always fails like an unreachable database
pub struct FailingSource;

impl TransactionSource for FailingSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, SourceError> {
        Err(SourceError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn income(date: NaiveDate, amount: Decimal) -> Transaction {
    Transaction::new(date, Amount::new(amount).unwrap(), TransactionType::Income)
        .with_category("Salary")
        .with_description("Paycheck")
}

pub fn expense(
    date: NaiveDate,
    amount: Decimal,
    category: &str,
    description: &str,
) -> Transaction {
    Transaction::new(date, Amount::new(amount).unwrap(), TransactionType::Expense)
        .with_category(category)
        .with_description(description)
}

/// Config pointing at `output_dir` with a fixed reference date
pub fn test_config(
    output_dir: &std::path::Path,
    password: Option<&str>,
    today: NaiveDate,
) -> Config {
    let output_dir = output_dir.display().to_string();
    let password = password.map(str::to_string);
    let today = today.format("%Y-%m-%d").to_string();

    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
        "OUTPUT_DIR" => Some(output_dir.clone()),
        "DASHBOARD_PASSWORD" => password.clone(),
        "REPORT_DATE" => Some(today.clone()),
        _ => None,
    })
    .unwrap()
}

/// Setup test database - recreate the read model and seed a small ledger
pub async fn setup_test_db() -> PgPool {
    setup_test_db_with_amount_type("NUMERIC(20, 8)").await
}

/// Same ledger as `setup_test_db`, with `amount` stored as `amount_type`
pub async fn setup_test_db_with_amount_type(amount_type: &str) -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let mut tx = pool.begin().await.expect("Failed to begin transaction");

    sqlx::query("DROP TABLE IF EXISTS transaction_read_model")
        .execute(&mut *tx)
        .await
        .expect("Failed to clean up DB");

    sqlx::query(&format!(
        r#"
        CREATE TABLE transaction_read_model (
            id BIGSERIAL PRIMARY KEY,
            transaction_date TIMESTAMPTZ NOT NULL,
            amount {amount_type} NOT NULL,
            type TEXT NOT NULL,
            category TEXT,
            description TEXT
        )
        "#
    ))
    .execute(&mut *tx)
    .await
    .expect("Failed to create read model");

    sqlx::query(
        r#"
        INSERT INTO transaction_read_model (transaction_date, amount, type, category, description)
        VALUES
            ('2024-02-03 09:00:00+00', '1200', 'income', 'Salary', 'February pay'),
            ('2024-01-10 12:30:00+00', '400', 'expense', 'Rent', NULL),
            ('2024-01-05 08:00:00+00', '1000', 'income', 'Salary', 'January pay'),
            ('2024-02-15 18:45:00+00', '300', 'expense', 'Food', 'Groceries')
        "#,
    )
    .execute(&mut *tx)
    .await
    .expect("Failed to seed transactions");

    tx.commit().await.expect("Failed to commit transaction");

    pool
}
