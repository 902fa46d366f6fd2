//! Category entity model and DTOs.

use lustre_core::error::CoreError;
use lustre_core::slug::{validate_display_name, validate_slug};
use lustre_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. Also the shape of one seed-document entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CreateCategory {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_display_name(&self.name)?;
        validate_slug(&self.slug)
    }
}
