//! Route definitions for categories.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;
use crate::uploads::MAX_IMAGE_BYTES;

/// Headroom for the text parts of the category form.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (multipart)
/// GET    /{id}      -> get_by_id
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list)
                .post(category::create)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + FORM_OVERHEAD_BYTES)),
        )
        .route("/{id}", get(category::get_by_id).delete(category::delete))
}
