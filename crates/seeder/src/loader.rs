//! Destructive catalog reload.
//!
//! A run has two phases, each in its own transaction:
//!
//! 1. **Reference data**: delete every category and brand, then insert the
//!    declared ones in order. Either the whole phase commits or nothing
//!    changes.
//! 2. **Products**: delete every product, build a [`SlugResolver`] from the
//!    reference rows just written, then insert each product record inside
//!    its own savepoint. Records with a caller-chosen id go first, then the
//!    id sequence is moved past them, then the rest take generated ids. A
//!    record that fails to decode, validate, or insert is skipped and
//!    reported; the others are kept.
//!
//! A product document that cannot be read at all still leaves the product
//! table empty: the delete is committed before the error is returned.

use lustre_core::product::ProductDefinition;
use lustre_core::slug::{ReferenceKind, SlugResolver};
use lustre_db::models::product::NewProduct;
use lustre_db::repositories::{BrandRepo, CategoryRepo, ProductRepo};
use lustre_db::DbPool;
use serde_json::Value;
use sqlx::{Connection, PgConnection};

use crate::error::SeedError;
use crate::report::{ProductReport, RecordFailure, ReferenceReport, SeedReport};
use crate::source::{ProductSource, SeedSource};

/// Runs the seeding phases against a database pool.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Reload reference data, then products.
    ///
    /// Stops at the first phase-level failure. If the product phase fails,
    /// the reference phase has already committed.
    pub async fn run(pool: &DbPool, source: &SeedSource) -> Result<SeedReport, SeedError> {
        let reference = Self::seed_reference(pool, source).await?;
        let products = Self::seed_products(pool, &source.products).await?;
        Ok(SeedReport {
            reference,
            products,
        })
    }

    /// Replace all categories and brands with the declared ones.
    pub async fn seed_reference(
        pool: &DbPool,
        source: &SeedSource,
    ) -> Result<ReferenceReport, SeedError> {
        let mut tx = pool.begin().await?;

        // Products reference categories and brands with ON DELETE SET NULL,
        // so clearing reference rows never fails on existing products.
        let categories_removed = CategoryRepo::delete_all(&mut tx).await?;
        let brands_removed = BrandRepo::delete_all(&mut tx).await?;

        for category in &source.categories {
            CategoryRepo::insert(&mut tx, category).await?;
        }
        for brand in &source.brands {
            BrandRepo::insert(&mut tx, brand).await?;
        }

        tx.commit().await?;

        let report = ReferenceReport {
            categories_removed,
            categories_inserted: source.categories.len(),
            brands_removed,
            brands_inserted: source.brands.len(),
        };
        tracing::info!(
            categories_removed = report.categories_removed,
            categories_inserted = report.categories_inserted,
            brands_removed = report.brands_removed,
            brands_inserted = report.brands_inserted,
            "Reference data seeded",
        );
        Ok(report)
    }

    /// Build a resolver from the category and brand rows currently stored.
    pub async fn build_resolver(conn: &mut PgConnection) -> Result<SlugResolver, sqlx::Error> {
        let categories = CategoryRepo::slug_index(conn).await?;
        let brands = BrandRepo::slug_index(conn).await?;
        Ok(SlugResolver::new(categories, brands))
    }

    /// Replace all products with the records of `products`.
    pub async fn seed_products(
        pool: &DbPool,
        products: &ProductSource,
    ) -> Result<ProductReport, SeedError> {
        let mut tx = pool.begin().await?;
        let removed = ProductRepo::delete_all(&mut tx).await?;

        let records = match products.read_records().await {
            Ok(records) => records,
            Err(e) => {
                tx.commit().await?;
                tracing::error!(
                    document = %products.document_name(),
                    removed,
                    error = %e,
                    "Product document unusable, product set left empty",
                );
                return Err(e);
            }
        };

        let resolver = Self::build_resolver(&mut tx).await?;
        let mut report = ProductReport {
            removed,
            ..Default::default()
        };

        let mut chosen_ids = Vec::new();
        let mut generated_ids = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let name = record_name(&record);
            match ProductDefinition::decode(record) {
                Ok(definition) if definition.id.is_some() => chosen_ids.push((index, definition)),
                Ok(definition) => generated_ids.push((index, definition)),
                Err(e) => skip(&mut report, index, name, e.to_string()),
            }
        }

        // Caller-chosen ids are all stored and the sequence moved past them
        // before any id is drawn from it.
        for (index, definition) in chosen_ids {
            Self::seed_record(&mut tx, &resolver, index, definition, &mut report).await;
        }
        ProductRepo::sync_id_sequence(&mut tx).await?;
        for (index, definition) in generated_ids {
            Self::seed_record(&mut tx, &resolver, index, definition, &mut report).await;
        }

        report.failures.sort_by_key(|failure| failure.index);
        tx.commit().await?;

        tracing::info!(
            removed = report.removed,
            inserted = report.inserted,
            skipped = report.failures.len(),
            unresolved_categories = report.unresolved_categories,
            unresolved_brands = report.unresolved_brands,
            "Products seeded",
        );
        Ok(report)
    }

    /// Resolve and insert one decoded record, tallying the outcome in
    /// `report`.
    async fn seed_record(
        conn: &mut PgConnection,
        resolver: &SlugResolver,
        index: usize,
        definition: ProductDefinition,
        report: &mut ProductReport,
    ) {
        let name = definition.name.clone();
        match Self::insert_record(conn, resolver, definition).await {
            Ok(outcome) => {
                report.inserted += 1;
                if !outcome.category_resolved {
                    report.unresolved_categories += 1;
                }
                if !outcome.brand_resolved {
                    report.unresolved_brands += 1;
                }
            }
            Err(reason) => skip(report, index, Some(name), reason),
        }
    }

    /// Insert one record inside a savepoint.
    ///
    /// Returns the failure reason on any per-record problem. Only the
    /// savepoint is rolled back, so the enclosing transaction stays usable.
    async fn insert_record(
        conn: &mut PgConnection,
        resolver: &SlugResolver,
        definition: ProductDefinition,
    ) -> Result<RecordOutcome, String> {
        let category = resolver.resolve(ReferenceKind::Category, &definition.category);
        let brand = resolver.resolve(ReferenceKind::Brand, &definition.brand);
        if !category.is_resolved() {
            tracing::warn!(
                product = %definition.name,
                slug = %definition.category,
                "Category slug did not resolve, storing without category link",
            );
        }
        if !brand.is_resolved() {
            tracing::warn!(
                product = %definition.name,
                slug = %definition.brand,
                "Brand slug did not resolve, storing without brand link",
            );
        }

        let new_product = NewProduct::from_definition(definition, category, brand);

        let mut savepoint = conn.begin().await.map_err(|e| e.to_string())?;
        match ProductRepo::insert(&mut savepoint, &new_product).await {
            Ok(product) => {
                savepoint.commit().await.map_err(|e| e.to_string())?;
                tracing::info!(
                    id = product.id,
                    product_number = %product.product_number,
                    "Product inserted",
                );
                Ok(RecordOutcome {
                    category_resolved: category.is_resolved(),
                    brand_resolved: brand.is_resolved(),
                })
            }
            Err(e) => {
                savepoint.rollback().await.map_err(|e| e.to_string())?;
                Err(format!("Insert rejected: {e}"))
            }
        }
    }
}

struct RecordOutcome {
    category_resolved: bool,
    brand_resolved: bool,
}

fn record_name(record: &Value) -> Option<String> {
    record.get("name").and_then(Value::as_str).map(str::to_string)
}

fn skip(report: &mut ProductReport, index: usize, name: Option<String>, reason: String) {
    tracing::warn!(index, name = ?name, %reason, "Skipping product record");
    report.failures.push(RecordFailure {
        index,
        name,
        reason,
    });
}
