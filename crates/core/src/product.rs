//! Product source records, defaults and product-number generation.
//!
//! A [`ProductDefinition`] is one entry of the declarative product document
//! consumed by the catalog loader, and also the body accepted by the admin
//! create endpoint. Fields use the camelCase names of the storefront's JSON
//! contract.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix of generated product numbers.
pub const PRODUCT_NUMBER_PREFIX: &str = "IN";

/// Smallest numeric suffix of a generated product number.
const PRODUCT_NUMBER_MIN: u32 = 1000;

/// One past the largest numeric suffix of a generated product number.
const PRODUCT_NUMBER_MAX: u32 = 10_000;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Product number
// ---------------------------------------------------------------------------

/// Generate a product number of the form `IN` + four pseudo-random digits.
///
/// No uniqueness check is made against existing products.
pub fn generate_product_number() -> String {
    let suffix = rand::rng().random_range(PRODUCT_NUMBER_MIN..PRODUCT_NUMBER_MAX);
    format!("{PRODUCT_NUMBER_PREFIX}{suffix}")
}

// ---------------------------------------------------------------------------
// Source record
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

/// One declared product.
///
/// Optional fields carry the catalog defaults: empty description and
/// content, `isNew = false`, `isSale = false`, `isStocked = true`. A missing
/// `productNumber` is generated at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinition {
    /// Caller-chosen surrogate id. Generated by the database when absent.
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub old_price: Option<Decimal>,
    /// Category slug.
    pub category: String,
    /// Brand slug.
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub image: String,
    pub image_gallery: Vec<String>,
    pub filter_items: Map<String, Value>,
    #[serde(default)]
    pub colors: Option<Value>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default = "default_true")]
    pub is_stocked: bool,
    #[serde(default)]
    pub product_number: Option<String>,
}

impl ProductDefinition {
    /// Decode and validate a single record of a product document.
    ///
    /// Fails with [`CoreError::Validation`] on a missing required field, a
    /// wrongly typed field, or a value rejected by [`Self::validate`].
    pub fn decode(record: Value) -> Result<Self, CoreError> {
        let definition: Self = serde_json::from_value(record)
            .map_err(|e| CoreError::Validation(format!("Malformed product record: {e}")))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check field-level constraints that serde cannot express.
    ///
    /// `oldPrice` is only required to be non-negative; it is not compared
    /// against `price`.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_product_name(&self.name)?;
        validate_price("price", self.price)?;
        if let Some(old_price) = self.old_price {
            validate_price("oldPrice", old_price)?;
        }
        if let Some(number) = &self.product_number {
            if number.trim().is_empty() {
                return Err(CoreError::Validation(
                    "productNumber must not be blank when supplied".into(),
                ));
            }
        }
        Ok(())
    }

    /// The supplied product number, or a freshly generated one.
    pub fn product_number_or_generate(&self) -> String {
        self.product_number
            .clone()
            .unwrap_or_else(generate_product_number)
    }
}

/// Validate a product name: non-blank and at most [`MAX_PRODUCT_NAME_LENGTH`].
pub fn validate_product_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Product name must not be empty".into()));
    }
    if name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Product name exceeds {MAX_PRODUCT_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a monetary amount named `field`: must be `>= 0`.
pub fn validate_price(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than or equal to 0, got {value}"
        )));
    }
    Ok(())
}
