//! Artifact decryption tool
//!
//! Run with: cargo run --bin decrypt_artifact -- public/data/kpi_summary.json
//!
//! Uses DASHBOARD_PASSWORD to open encrypted artifacts. Plain artifacts
//! are printed as-is.

use anyhow::Context;
use dashboard_etl::crypto::{open_as, EncryptedArtifact};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .context("usage: decrypt_artifact <artifact.json>")?;

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let document: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path))?;

    let is_envelope = document.get("encrypted").and_then(|v| v.as_bool()).unwrap_or(false);
    let plaintext = if is_envelope {
        let envelope: EncryptedArtifact = serde_json::from_value(document)?;
        let password = std::env::var("DASHBOARD_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .context("DASHBOARD_PASSWORD is required to decrypt this artifact")?;

        open_as::<serde_json::Value>(&envelope, &password)?
    } else {
        eprintln!("{} is not encrypted", path);
        document
    };

    println!("{}", serde_json::to_string_pretty(&plaintext)?);

    Ok(())
}
