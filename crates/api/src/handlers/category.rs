//! Handlers for the `/categories` resource.
//!
//! Category creation takes a multipart form so an image can be uploaded in
//! the same request.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lustre_core::error::CoreError;
use lustre_core::types::DbId;
use lustre_db::models::category::CreateCategory;
use lustre_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// An image part of the category form: either an uploaded file or a path
/// supplied as plain text.
enum ImageField {
    File { file_name: String, bytes: Vec<u8> },
    Path(String),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// List all categories ordered by name.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Multipart form with required `name` and `slug` fields and an optional
/// `image` field. A file `image` is handed to the image store and the
/// returned path is stored; a text `image` is stored as given.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut name: Option<String> = None;
    let mut slug: Option<String> = None;
    let mut image: Option<ImageField> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "slug" => {
                slug = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "image" => {
                image = match field.file_name().map(str::to_string) {
                    Some(file_name) => {
                        let bytes = field
                            .bytes()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?;
                        Some(ImageField::File {
                            file_name,
                            bytes: bytes.to_vec(),
                        })
                    }
                    None => {
                        let text = field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?;
                        (!text.trim().is_empty()).then_some(ImageField::Path(text))
                    }
                };
            }
            _ => {} // ignore unknown fields
        }
    }

    let mut input = CreateCategory {
        name: name.ok_or_else(|| AppError::BadRequest("Missing required 'name' field".into()))?,
        slug: slug.ok_or_else(|| AppError::BadRequest("Missing required 'slug' field".into()))?,
        image: None,
    };
    input.validate()?;

    // Reject duplicates before anything is written to the image store.
    if CategoryRepo::find_id_by_slug(&state.pool, &input.slug)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category slug '{}' already exists",
            input.slug
        ))));
    }

    input.image = match image {
        Some(ImageField::File { file_name, bytes }) => {
            Some(state.image_store.store(&file_name, &bytes).await?)
        }
        Some(ImageField::Path(path)) => Some(path),
        None => None,
    };

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = category.id,
        slug = %category.slug,
        admin_id = admin.user_id,
        "Category created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Products in the category keep their `category` slug; their
/// `categoryId` becomes null.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(id, admin_id = admin.user_id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
