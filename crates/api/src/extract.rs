//! Request extractors whose rejections use the API error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body.
///
/// Same as [`axum::Json`] on success. A missing content type, unparseable
/// body or wrongly shaped payload is rejected as an [`AppError`] so the
/// client gets `{error, code}` like every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
