//! dashboard_etl - Financial Dashboard ETL
//!
//! Reads the transaction read model, aggregates it into KPI, monthly and
//! daily artifacts, encrypts them and writes them for the static dashboard.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_etl::{pipeline, Config, EtlResult, PgTransactionSource, RunReport};

/// Initialize tracing/logging
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dashboard_etl=info".into());

    let json = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> EtlResult<RunReport> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    let source = PgTransactionSource::new(pool);

    // The pool is closed on both the success and the failure path
    let result = match source.verify().await {
        Ok(()) => pipeline::run(&config, &source).await,
        Err(e) => Err(e.into()),
    };
    source.close().await;

    result
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    match run().await {
        Ok(report) => {
            tracing::info!(
                transactions = report.transactions_fetched,
                months = report.months,
                days = report.days,
                encrypted = report.encrypted,
                report_date = %report.report_date,
                "ETL completed successfully."
            );
        }
        Err(e) => {
            tracing::error!(stage = e.stage(), error = %e, "ETL failed");
            eprintln!("ETL failed: {}", e);
            std::process::exit(1);
        }
    }
}
