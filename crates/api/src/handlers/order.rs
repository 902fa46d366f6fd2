//! Handlers for the `/orders` resource.
//!
//! The submitted items, shipping details and total are stored exactly as
//! sent. Callers compute the total, generate the order number and check
//! stock; nothing here recomputes or cross-checks them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lustre_core::error::CoreError;
use lustre_core::order::OrderSubmission;
use lustre_core::types::DbId;
use lustre_db::repositories::OrderRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::RequireAdmin;
use crate::query::OrderListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/orders
///
/// Guests may order. When a valid bearer token is present and the body
/// has no `userId`, the caller's id is recorded. A body of the wrong shape
/// is a validation error, like a missing field.
pub async fn create(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let mut submission: OrderSubmission = serde_json::from_value(body)
        .map_err(|e| CoreError::Validation(format!("Malformed order: {e}")))?;
    if submission.user_id.is_none() {
        submission.user_id = user.map(|u| u.user_id);
    }
    let input = submission.validate()?;

    let order = OrderRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = order.id,
        order_number = %order.order_number,
        user_id = ?order.user_id,
        "Order created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/v1/orders/{id}
///
/// Visible to the order's owner and to admins.
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    if !user.is_admin() && order.user_id != Some(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Order belongs to another user".into(),
        )));
    }
    Ok(Json(DataResponse { data: order }))
}

/// GET /api/v1/orders?user_id=&limit=&offset=
///
/// Newest first.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<impl IntoResponse> {
    let orders = OrderRepo::list(&state.pool, params.user_id, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: orders }))
}
