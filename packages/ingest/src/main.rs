use std::sync::Arc;

use anyhow::Context;
use common::database::init_db;
use common::seed::seed_languages;
use ingest::{CodeforcesClient, IngestAppConfig, Ingestor};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    if let Err(e) = run().await {
        error!(error = %format!("{e:#}"), "Ingestion run failed");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = IngestAppConfig::load().context("Failed to load config")?;
    info!(
        api_url = %config.source.api_url,
        max_contests = config.ingest.max_contests,
        locales = ?config.ingest.locales,
        "Ingestor starting"
    );

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    seed_languages(&db)
        .await
        .context("Failed to seed languages")?;

    let client = CodeforcesClient::new(&config.source).context("Failed to build HTTP client")?;
    let ingestor = Ingestor::new(Arc::new(client), db, config.ingest);

    let report = ingestor.run().await?;
    info!(
        contests = report.contests_processed,
        problems = report.problems_stored,
        "Catalog is up to date"
    );
    Ok(())
}
