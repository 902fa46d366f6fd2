//! Handlers for the `/brands` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lustre_core::error::CoreError;
use lustre_core::types::DbId;
use lustre_db::models::brand::CreateBrand;
use lustre_db::repositories::BrandRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/brands
///
/// List all brands ordered by name.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// POST /api/v1/brands
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBrand>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let brand = BrandRepo::create(&state.pool, &input).await?;
    tracing::info!(id = brand.id, slug = %brand.slug, admin_id = admin.user_id, "Brand created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// GET /api/v1/brands/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Brand", id }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BrandRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Brand deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Brand", id }))
    }
}
