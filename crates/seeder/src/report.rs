use serde::Serialize;

/// Outcome of a full seeding run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub reference: ReferenceReport,
    pub products: ProductReport,
}

/// Row counts for the reference-data phase.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceReport {
    pub categories_removed: u64,
    pub categories_inserted: usize,
    pub brands_removed: u64,
    pub brands_inserted: usize,
}

/// Row counts and skipped records for the product phase.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    pub removed: u64,
    pub inserted: usize,
    /// Records that were not stored, in document order.
    pub failures: Vec<RecordFailure>,
    /// Stored products whose category slug matched no category.
    pub unresolved_categories: usize,
    /// Stored products whose brand slug matched no brand.
    pub unresolved_brands: usize,
}

/// A product record skipped during seeding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailure {
    /// Zero-based position in the product document.
    pub index: usize,
    /// The record's `name`, when it had a readable one.
    pub name: Option<String>,
    pub reason: String,
}

impl ProductReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
