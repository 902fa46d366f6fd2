pub mod brand;
pub mod category;
pub mod health;
pub mod order;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                    list (public), create (admin, multipart)
/// /categories/{id}               get (public), delete (admin)
///
/// /brands                        list (public), create (admin)
/// /brands/{id}                   get (public), delete (admin)
///
/// /products                      list with filters (public), create (admin)
/// /products/{id}                 get (public), update, delete (admin)
///
/// /orders                        create (guest or signed in), list (admin)
/// /orders/{id}                   get (owner or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/brands", brand::router())
        .nest("/products", product::router())
        .nest("/orders", order::router())
}
