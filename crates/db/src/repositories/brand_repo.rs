//! Repository for the `brands` table.

use lustre_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::brand::{Brand, CreateBrand};

/// Column list for the `brands` table.
const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides CRUD operations for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand.
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input).await
    }

    /// Insert a new brand on an existing connection or transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateBrand,
    ) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, slug) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the ID of the brand with exactly this slug.
    pub async fn find_id_by_slug(pool: &PgPool, slug: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM brands WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all brands ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY name, id");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// All `(slug, id)` pairs, for building a slug resolver.
    pub async fn slug_index(conn: &mut PgConnection) -> Result<Vec<(String, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (String, DbId)>("SELECT slug, id FROM brands")
            .fetch_all(conn)
            .await
    }

    /// Delete a brand. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every brand. Returns the number of rows removed.
    pub async fn delete_all(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands").execute(conn).await?;
        Ok(result.rows_affected())
    }
}
