//! Shared query parameter types for API handlers.

use lustre_core::types::DbId;
use serde::Deserialize;

/// Query parameters for `GET /orders` (`?user_id=&limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
