use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lustre_seeder::config::SeedConfig;
use lustre_seeder::{CatalogLoader, SeedSource};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lustre_seeder=info,lustre_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "Seeding failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // --- Configuration ---
    let config = SeedConfig::from_env()?;
    tracing::info!(seed_dir = %config.seed_dir.display(), "Loaded seeder configuration");

    // --- Database ---
    let pool = lustre_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    lustre_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Seed ---
    let result = async {
        let source = SeedSource::from_dir(&config.seed_dir).await?;
        CatalogLoader::run(&pool, &source).await
    }
    .await;

    pool.close().await;

    let report = result.context("Catalog seeding aborted")?;
    if !report.products.is_clean() {
        tracing::warn!(
            skipped = report.products.failures.len(),
            "Some product records were skipped",
        );
    }
    tracing::info!(
        categories = report.reference.categories_inserted,
        brands = report.reference.brands_inserted,
        products = report.products.inserted,
        "Catalog seeding complete",
    );
    Ok(())
}
