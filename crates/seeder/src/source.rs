//! Declarative seed documents.
//!
//! Reference data (categories, brands) is read and validated up front: a
//! bad reference document aborts the run before anything is deleted. The
//! product document is only read once the product phase starts, so a bad
//! product document leaves freshly seeded reference data in place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lustre_db::models::brand::CreateBrand;
use lustre_db::models::category::CreateCategory;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SeedError;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const BRANDS_FILE: &str = "brands.json";
pub const PRODUCTS_FILE: &str = "products.json";

// ---------------------------------------------------------------------------
// Product document
// ---------------------------------------------------------------------------

/// Where the product document comes from.
#[derive(Debug, Clone)]
pub enum ProductSource {
    /// A JSON file read when the product phase begins.
    File(PathBuf),
    /// An in-memory JSON document.
    Inline(String),
}

impl ProductSource {
    /// Name used in logs and error messages.
    pub fn document_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(_) => "inline product document".to_string(),
        }
    }

    /// Read the document and split it into raw records.
    ///
    /// Only the document-level shape is checked here (readable, valid JSON,
    /// top-level array). Each record is decoded separately by the loader so
    /// that one bad record does not sink the rest.
    pub async fn read_records(&self) -> Result<Vec<Value>, SeedError> {
        let name = self.document_name();
        match self {
            Self::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SeedError::source_data(&name, e))?;
                parse_product_document(&name, &text)
            }
            Self::Inline(text) => parse_product_document(&name, text),
        }
    }
}

/// Parse a product document into its records.
pub fn parse_product_document(document: &str, text: &str) -> Result<Vec<Value>, SeedError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(other) => Err(SeedError::source_data(
            document,
            format!("expected a JSON array of products, found {}", json_kind(&other)),
        )),
        Err(e) => Err(SeedError::source_data(document, e)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Seed source
// ---------------------------------------------------------------------------

/// Everything a seeding run loads, in declared order.
#[derive(Debug, Clone)]
pub struct SeedSource {
    pub categories: Vec<CreateCategory>,
    pub brands: Vec<CreateBrand>,
    pub products: ProductSource,
}

impl SeedSource {
    /// Load `categories.json` and `brands.json` from `dir`; `products.json`
    /// is referenced but not read yet.
    pub async fn from_dir(dir: &Path) -> Result<Self, SeedError> {
        let categories = read_document(&dir.join(CATEGORIES_FILE)).await?;
        let brands = read_document(&dir.join(BRANDS_FILE)).await?;
        Self::from_parts(
            &categories,
            &brands,
            ProductSource::File(dir.join(PRODUCTS_FILE)),
        )
    }

    /// Build a source from reference documents held in memory.
    pub fn from_parts(
        categories_json: &str,
        brands_json: &str,
        products: ProductSource,
    ) -> Result<Self, SeedError> {
        let categories: Vec<CreateCategory> = parse_reference(CATEGORIES_FILE, categories_json)?;
        for (index, category) in categories.iter().enumerate() {
            category
                .validate()
                .map_err(|e| SeedError::source_data(CATEGORIES_FILE, format!("entry {index}: {e}")))?;
        }
        ensure_unique_slugs(CATEGORIES_FILE, categories.iter().map(|c| c.slug.as_str()))?;

        let brands: Vec<CreateBrand> = parse_reference(BRANDS_FILE, brands_json)?;
        for (index, brand) in brands.iter().enumerate() {
            brand
                .validate()
                .map_err(|e| SeedError::source_data(BRANDS_FILE, format!("entry {index}: {e}")))?;
        }
        ensure_unique_slugs(BRANDS_FILE, brands.iter().map(|b| b.slug.as_str()))?;

        Ok(Self {
            categories,
            brands,
            products,
        })
    }
}

async fn read_document(path: &Path) -> Result<String, SeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SeedError::source_data(path.display().to_string(), e))
}

fn parse_reference<T: DeserializeOwned>(document: &str, text: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(text).map_err(|e| SeedError::source_data(document, e))
}

fn ensure_unique_slugs<'a>(
    document: &str,
    slugs: impl Iterator<Item = &'a str>,
) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(SeedError::source_data(
                document,
                format!("slug '{slug}' is declared more than once"),
            ));
        }
    }
    Ok(())
}
