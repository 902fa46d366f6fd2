//! Brand entity model and DTOs.

use lustre_core::error::CoreError;
use lustre_core::slug::{validate_display_name, validate_slug};
use lustre_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a brand. Also the shape of one seed-document entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrand {
    pub name: String,
    pub slug: String,
}

impl CreateBrand {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_display_name(&self.name)?;
        validate_slug(&self.slug)
    }
}
