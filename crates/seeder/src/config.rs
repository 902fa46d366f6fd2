use std::path::PathBuf;

use anyhow::Context;

/// Default directory holding the seed documents.
const DEFAULT_SEED_DIR: &str = "db/seed";

/// Seeder configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Directory containing `categories.json`, `brands.json` and
    /// `products.json`.
    pub seed_dir: PathBuf,
}

impl SeedConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var        | Required | Default   |
    /// |----------------|----------|-----------|
    /// | `DATABASE_URL` | **yes**  | --        |
    /// | `SEED_DIR`     | no       | `db/seed` |
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let seed_dir = std::env::var("SEED_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SEED_DIR));
        Ok(Self {
            database_url,
            seed_dir,
        })
    }
}
