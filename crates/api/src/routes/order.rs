//! Route definitions for orders.

use axum::routing::get;
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list).post(order::create))
        .route("/{id}", get(order::get_by_id))
}
