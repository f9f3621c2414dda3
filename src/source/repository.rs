//! Postgres-backed transaction source

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{SourceError, TransactionSource};
use crate::db::{self, TRANSACTION_READ_MODEL};
use crate::domain::{Amount, DomainError, Transaction, TransactionType};

/// Raw row from `transaction_read_model`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = SourceError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let date = row.date;
        let invalid = move |source: DomainError| SourceError::InvalidRow { date, source };

        let kind: TransactionType = row.kind.parse().map_err(invalid)?;
        let amount = Amount::new(row.amount).map_err(|e| invalid(e.into()))?;

        Ok(Transaction {
            date: row.date,
            amount,
            kind,
            category: row.category.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
        })
    }
}

/// Reads the ledger from the Postgres read model
#[derive(Debug, Clone)]
pub struct PgTransactionSource {
    pool: PgPool,
}

impl PgTransactionSource {
    /// Create a new PgTransactionSource
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify connectivity and that the read model exists
    pub async fn verify(&self) -> Result<(), SourceError> {
        db::verify_connection(&self.pool).await?;

        if !db::check_schema(&self.pool).await? {
            return Err(SourceError::SchemaMissing(TRANSACTION_READ_MODEL));
        }

        Ok(())
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl TransactionSource for PgTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, SourceError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT
                transaction_date::date AS date,
                amount::numeric AS amount,
                type::text AS type,
                category,
                description
            FROM transaction_read_model
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(rows = rows.len(), "Fetched transaction rows");

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
