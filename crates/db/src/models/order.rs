//! Order entity model.
//!
//! Inserts take a validated [`lustre_core::order::NewOrder`]; there is no
//! update DTO because the items/shipping snapshot is write-once.

use lustre_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub user_id: Option<DbId>,
    pub total_amount: Decimal,
    pub items: Value,
    pub shipping_info: Value,
    pub created_at: Timestamp,
}
