//! Product entity model and DTOs.
//!
//! A product carries its category and brand twice: as the slug strings it
//! was declared with (`category`, `brand`) and as the relational ids those
//! slugs resolved to when the row was written (`category_id`, `brand_id`).
//! Either may be used to query.

use lustre_core::error::CoreError;
use lustre_core::product::{validate_price, validate_product_name, ProductDefinition};
use lustre_core::slug::{validate_slug, Resolution};
use lustre_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub image_gallery: Vec<String>,
    pub filter_items: Value,
    pub colors: Option<Value>,
    pub is_new: bool,
    pub is_sale: bool,
    pub is_stocked: bool,
    pub product_number: String,
    pub category_id: Option<DbId>,
    pub brand_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A fully defaulted, resolved product ready to insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Option<DbId>,
    pub name: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub category: String,
    pub brand: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub image_gallery: Vec<String>,
    pub filter_items: Value,
    pub colors: Option<Value>,
    pub is_new: bool,
    pub is_sale: bool,
    pub is_stocked: bool,
    pub product_number: String,
    pub category_id: Option<DbId>,
    pub brand_id: Option<DbId>,
}

impl NewProduct {
    /// Build an insertable product from a declared definition and the
    /// outcome of resolving its category and brand slugs.
    ///
    /// The slug strings are kept exactly as declared whether or not they
    /// resolved. A missing product number is generated here.
    pub fn from_definition(
        definition: ProductDefinition,
        category: Resolution,
        brand: Resolution,
    ) -> Self {
        let product_number = definition.product_number_or_generate();
        Self {
            id: definition.id,
            name: definition.name,
            price: definition.price,
            old_price: definition.old_price,
            category: definition.category,
            brand: definition.brand,
            description: definition.description,
            content: definition.content,
            image: definition.image,
            image_gallery: definition.image_gallery,
            filter_items: Value::Object(definition.filter_items),
            colors: definition.colors,
            is_new: definition.is_new,
            is_sale: definition.is_sale,
            is_stocked: definition.is_stocked,
            product_number,
            category_id: category.id(),
            brand_id: brand.id(),
        }
    }
}

/// DTO for updating an existing product. All fields optional.
///
/// Changing `category` or `brand` re-resolves the matching relational id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub image_gallery: Option<Vec<String>>,
    pub filter_items: Option<serde_json::Map<String, Value>>,
    pub colors: Option<Value>,
    pub is_new: Option<bool>,
    pub is_sale: Option<bool>,
    pub is_stocked: Option<bool>,
    pub product_number: Option<String>,
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_product_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price("price", price)?;
        }
        if let Some(old_price) = self.old_price {
            validate_price("oldPrice", old_price)?;
        }
        if let Some(category) = &self.category {
            validate_slug(category)?;
        }
        if let Some(brand) = &self.brand {
            validate_slug(brand)?;
        }
        if let Some(number) = &self.product_number {
            if number.trim().is_empty() {
                return Err(CoreError::Validation("productNumber must not be blank".into()));
            }
        }
        Ok(())
    }
}

/// Query filters for product listing. Every filter is optional and they
/// combine with AND.
///
/// `category`/`brand` match the denormalized slug strings (including
/// products whose relation did not resolve); `category_id`/`brand_id`
/// match the relational columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub category_id: Option<DbId>,
    pub brand_id: Option<DbId>,
    pub in_stock: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Relational ids to rewrite during an update.
///
/// `None` leaves the column as it is; `Some(resolution)` overwrites it,
/// storing NULL for [`Resolution::Unresolved`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Relink {
    pub category: Option<Resolution>,
    pub brand: Option<Resolution>,
}
