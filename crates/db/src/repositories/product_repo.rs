//! Repository for the `products` table.

use lustre_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lustre_core::types::DbId;
use serde_json::Value;
use sqlx::{PgConnection, PgPool};

use crate::models::product::{NewProduct, Product, ProductFilter, Relink, UpdateProduct};

/// Column list for the `products` table.
const COLUMNS: &str = "id, name, price, old_price, category, brand, description, content, \
    image, image_gallery, filter_items, colors, is_new, is_sale, is_stocked, \
    product_number, category_id, brand_id, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert(&mut conn, input).await
    }

    /// Insert a new product on an existing connection or transaction.
    ///
    /// When `input.id` is `None` the id comes from the table's sequence.
    /// After inserting caller-chosen ids, call [`Self::sync_id_sequence`].
    pub async fn insert(conn: &mut PgConnection, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (\
                id, name, price, old_price, category, brand, description, content, \
                image, image_gallery, filter_items, colors, is_new, is_sale, is_stocked, \
                product_number, category_id, brand_id\
             ) VALUES (\
                COALESCE($1, nextval(pg_get_serial_sequence('products', 'id'))), \
                $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18\
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.old_price)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.image_gallery)
            .bind(&input.filter_items)
            .bind(&input.colors)
            .bind(input.is_new)
            .bind(input.is_sale)
            .bind(input.is_stocked)
            .bind(&input.product_number)
            .bind(input.category_id)
            .bind(input.brand_id)
            .fetch_one(conn)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products matching `filter`, ordered by id, paginated.
    pub async fn list(pool: &PgPool, filter: &ProductFilter) -> Result<Vec<Product>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE ($1::TEXT IS NULL OR category = $1) \
               AND ($2::TEXT IS NULL OR brand = $2) \
               AND ($3::BIGINT IS NULL OR category_id = $3) \
               AND ($4::BIGINT IS NULL OR brand_id = $4) \
               AND ($5::BOOLEAN IS NULL OR is_stocked = $5) \
             ORDER BY id \
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&filter.category)
            .bind(&filter.brand)
            .bind(filter.category_id)
            .bind(filter.brand_id)
            .bind(filter.in_stock)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of products.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
    }

    /// Update a product. Only non-`None` fields are applied; relational ids
    /// are rewritten only where `relink` says so.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
        relink: Relink,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                price = COALESCE($3, price), \
                old_price = COALESCE($4, old_price), \
                category = COALESCE($5, category), \
                brand = COALESCE($6, brand), \
                description = COALESCE($7, description), \
                content = COALESCE($8, content), \
                image = COALESCE($9, image), \
                image_gallery = COALESCE($10, image_gallery), \
                filter_items = COALESCE($11, filter_items), \
                colors = COALESCE($12, colors), \
                is_new = COALESCE($13, is_new), \
                is_sale = COALESCE($14, is_sale), \
                is_stocked = COALESCE($15, is_stocked), \
                product_number = COALESCE($16, product_number), \
                category_id = CASE WHEN $17 THEN $18 ELSE category_id END, \
                brand_id = CASE WHEN $19 THEN $20 ELSE brand_id END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let filter_items = input.filter_items.clone().map(Value::Object);
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.old_price)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.image_gallery)
            .bind(filter_items)
            .bind(&input.colors)
            .bind(input.is_new)
            .bind(input.is_sale)
            .bind(input.is_stocked)
            .bind(&input.product_number)
            .bind(relink.category.is_some())
            .bind(relink.category.and_then(|r| r.id()))
            .bind(relink.brand.is_some())
            .bind(relink.brand.and_then(|r| r.id()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every product. Returns the number of rows removed.
    pub async fn delete_all(conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products").execute(conn).await?;
        Ok(result.rows_affected())
    }

    /// Move the id sequence past the highest stored id so generated ids
    /// never collide with caller-chosen ones.
    pub async fn sync_id_sequence(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('products', 'id'), \
                COALESCE((SELECT MAX(id) FROM products), 0) + 1, false)",
        )
        .execute(conn)
        .await?;
        Ok(())
    }
}
