//! Repository for the `orders` table.
//!
//! Orders are insert-only here. The repository never reads `products`: the
//! submitted items are stored as an independent snapshot.

use lustre_core::order::NewOrder;
use lustre_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lustre_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::Order;

/// Column list for the `orders` table.
const COLUMNS: &str =
    "id, order_number, user_id, total_amount, items, shipping_info, created_at";

/// Provides create and read operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order in a single statement.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (order_number, user_id, total_amount, items, shipping_info) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.order_number)
            .bind(input.user_id)
            .bind(input.total_amount)
            .bind(&input.items)
            .bind(&input.shipping_info)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All orders carrying this order number, oldest first.
    ///
    /// Order numbers are not unique at the storage layer, so this may
    /// return more than one row.
    pub async fn find_by_order_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_number = $1 ORDER BY id");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .fetch_all(pool)
            .await
    }

    /// List orders newest first, optionally restricted to one user.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
