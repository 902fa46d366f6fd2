/// Phase-level seeding failures.
///
/// Per-record product problems are not errors at this level; they are
/// collected in [`crate::report::ProductReport::failures`].
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A source document is unreadable, not valid JSON, or has the wrong
    /// overall shape.
    #[error("Source data error in {document}: {message}")]
    SourceData { document: String, message: String },

    /// The store rejected a phase-level operation.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl SeedError {
    pub(crate) fn source_data(document: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceData {
            document: document.into(),
            message: message.to_string(),
        }
    }
}
