//! Handlers for the `/products` resource.
//!
//! Products created or edited here resolve their category and brand slugs
//! against the current reference rows, the same way the catalog loader
//! does. A slug that matches nothing is stored as given with a null
//! relation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lustre_core::error::CoreError;
use lustre_core::product::ProductDefinition;
use lustre_core::slug::{ReferenceKind, Resolution};
use lustre_core::types::DbId;
use lustre_db::models::product::{NewProduct, ProductFilter, Relink, UpdateProduct};
use lustre_db::repositories::{BrandRepo, CategoryRepo, ProductRepo};
use lustre_db::DbPool;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Look up a slug among the stored rows of `kind`.
async fn resolve(pool: &DbPool, kind: ReferenceKind, slug: &str) -> AppResult<Resolution> {
    let id = match kind {
        ReferenceKind::Category => CategoryRepo::find_id_by_slug(pool, slug).await?,
        ReferenceKind::Brand => BrandRepo::find_id_by_slug(pool, slug).await?,
    };
    let resolution = Resolution::from(id);
    if !resolution.is_resolved() {
        tracing::warn!(kind = %kind, slug, "Slug did not resolve, storing without link");
    }
    Ok(resolution)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products?category=&brand=&category_id=&brand_id=&in_stock=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
///
/// Accepts the same record shape as the product seed document. Any `id` in
/// the body is ignored; the id is always generated.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let definition = ProductDefinition::decode(body)?;

    let category = resolve(&state.pool, ReferenceKind::Category, &definition.category).await?;
    let brand = resolve(&state.pool, ReferenceKind::Brand, &definition.brand).await?;

    let mut input = NewProduct::from_definition(definition, category, brand);
    input.id = None;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = product.id,
        product_number = %product.product_number,
        admin_id = admin.user_id,
        "Product created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
///
/// Partial update. Changing `category` or `brand` re-resolves the matching
/// relational id.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut relink = Relink::default();
    if let Some(slug) = &input.category {
        relink.category = Some(resolve(&state.pool, ReferenceKind::Category, slug).await?);
    }
    if let Some(slug) = &input.brand {
        relink.brand = Some(resolve(&state.pool, ReferenceKind::Brand, slug).await?);
    }

    let product = ProductRepo::update(&state.pool, id, &input, relink)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    tracing::info!(id, admin_id = admin.user_id, "Product updated");
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
///
/// Orders that captured this product keep their snapshot.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
    }
}
