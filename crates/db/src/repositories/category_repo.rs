//! Repository for the `categories` table.

use lustre_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::category::{Category, CreateCategory};

/// Column list for the `categories` table.
const COLUMNS: &str = "id, name, slug, image, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input).await
    }

    /// Insert a new category on an existing connection or transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, image) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.image)
            .fetch_one(conn)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the ID of the category with exactly this slug.
    pub async fn find_id_by_slug(pool: &PgPool, slug: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// All `(slug, id)` pairs, for building a slug resolver.
    pub async fn slug_index(conn: &mut PgConnection) -> Result<Vec<(String, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (String, DbId)>("SELECT slug, id FROM categories")
            .fetch_all(conn)
            .await
    }

    /// Delete a category. Products pointing at it keep their slug and lose
    /// the relational id (`ON DELETE SET NULL`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every category. Returns the number of rows removed.
    pub async fn delete_all(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories").execute(conn).await?;
        Ok(result.rows_affected())
    }
}
