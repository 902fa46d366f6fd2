//! Route definitions for brands.

use axum::routing::get;
use axum::Router;

use crate::handlers::brand;
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brand::list).post(brand::create))
        .route("/{id}", get(brand::get_by_id).delete(brand::delete))
}
