//! Slug resolution for catalog reference data.
//!
//! Products name their category and brand by slug. Before a product is
//! written, the slug is turned into the surrogate id of the matching row.
//! A miss is a normal outcome (the product references reference data that
//! does not exist yet) and is reported as [`Resolution::Unresolved`] rather
//! than an error.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a category or brand slug.
pub const MAX_SLUG_LENGTH: usize = 100;

/// Validate a slug: non-empty, no whitespace, at most [`MAX_SLUG_LENGTH`].
///
/// Case is preserved and not normalised; resolution is an exact match.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' must not contain whitespace"
        )));
    }
    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug exceeds {MAX_SLUG_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a display name for reference data: must not be blank.
pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reference kind
// ---------------------------------------------------------------------------

/// The two kinds of reference data a product can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Category,
    Brand,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Brand => "brand",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of looking up a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum Resolution {
    /// The slug matched a row with this surrogate id.
    Resolved(DbId),
    /// No row carries this slug; the relation is stored as NULL.
    Unresolved,
}

impl Resolution {
    /// The surrogate id to store in the foreign-key column.
    pub fn id(self) -> Option<DbId> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<DbId>> for Resolution {
    fn from(id: Option<DbId>) -> Self {
        match id {
            Some(id) => Self::Resolved(id),
            None => Self::Unresolved,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Read-only slug lookup tables, one per [`ReferenceKind`].
///
/// Built from a snapshot of the current category and brand rows. The
/// resolver never reads the store itself; rebuild it whenever the reference
/// data changes (the catalog loader does so right after reseeding).
///
/// Matching is exact and case-sensitive: `"Skincare"` does not resolve
/// against a row whose slug is `"skincare"`.
#[derive(Debug, Clone, Default)]
pub struct SlugResolver {
    categories: HashMap<String, DbId>,
    brands: HashMap<String, DbId>,
}

impl SlugResolver {
    /// Build the lookup tables from `(slug, id)` pairs.
    pub fn new<C, B, S>(categories: C, brands: B) -> Self
    where
        C: IntoIterator<Item = (S, DbId)>,
        B: IntoIterator<Item = (S, DbId)>,
        S: Into<String>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(slug, id)| (slug.into(), id))
                .collect(),
            brands: brands
                .into_iter()
                .map(|(slug, id)| (slug.into(), id))
                .collect(),
        }
    }

    /// Look up `slug` among the rows of `kind`.
    pub fn resolve(&self, kind: ReferenceKind, slug: &str) -> Resolution {
        self.table(kind).get(slug).copied().into()
    }

    /// Number of slugs known for `kind`.
    pub fn len(&self, kind: ReferenceKind) -> usize {
        self.table(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.brands.is_empty()
    }

    /// All slugs known for `kind`, in no particular order.
    pub fn slugs(&self, kind: ReferenceKind) -> impl Iterator<Item = &str> {
        self.table(kind).keys().map(String::as_str)
    }

    fn table(&self, kind: ReferenceKind) -> &HashMap<String, DbId> {
        match kind {
            ReferenceKind::Category => &self.categories,
            ReferenceKind::Brand => &self.brands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SlugResolver {
        SlugResolver::new(
            [("skincare", 1), ("makeup", 2)],
            [("cerave", 10), ("the-ordinary", 11)],
        )
    }

    #[test]
    fn resolves_known_slugs_per_kind() {
        let r = resolver();
        assert_eq!(r.resolve(ReferenceKind::Category, "skincare"), Resolution::Resolved(1));
        assert_eq!(r.resolve(ReferenceKind::Category, "makeup"), Resolution::Resolved(2));
        assert_eq!(r.resolve(ReferenceKind::Brand, "cerave"), Resolution::Resolved(10));
        assert_eq!(r.resolve(ReferenceKind::Brand, "the-ordinary"), Resolution::Resolved(11));
    }

    #[test]
    fn kinds_do_not_share_tables() {
        let r = resolver();
        assert_eq!(r.resolve(ReferenceKind::Brand, "skincare"), Resolution::Unresolved);
        assert_eq!(r.resolve(ReferenceKind::Category, "cerave"), Resolution::Unresolved);
    }

    #[test]
    fn unknown_slug_is_unresolved() {
        let r = resolver();
        assert_eq!(r.resolve(ReferenceKind::Category, "haircare"), Resolution::Unresolved);
        assert_eq!(r.resolve(ReferenceKind::Brand, ""), Resolution::Unresolved);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let r = resolver();
        assert_eq!(r.resolve(ReferenceKind::Category, "Skincare"), Resolution::Unresolved);
        assert_eq!(r.resolve(ReferenceKind::Brand, "CERAVE"), Resolution::Unresolved);
    }

    #[test]
    fn empty_resolver_resolves_nothing() {
        let r = SlugResolver::default();
        assert!(r.is_empty());
        assert_eq!(r.resolve(ReferenceKind::Category, "skincare"), Resolution::Unresolved);
    }

    #[test]
    fn slugs_lists_exactly_the_declared_set() {
        let r = resolver();
        let mut slugs: Vec<_> = r.slugs(ReferenceKind::Category).collect();
        slugs.sort_unstable();
        assert_eq!(slugs, vec!["makeup", "skincare"]);
        assert_eq!(r.len(ReferenceKind::Brand), 2);
    }

    #[test]
    fn resolution_id_maps_to_nullable_column() {
        assert_eq!(Resolution::Resolved(7).id(), Some(7));
        assert_eq!(Resolution::Unresolved.id(), None);
        assert!(Resolution::Resolved(7).is_resolved());
        assert!(!Resolution::Unresolved.is_resolved());
    }

    #[test]
    fn slug_validation() {
        assert!(validate_slug("skincare").is_ok());
        assert!(validate_slug("The-Ordinary").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("hair care").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }

    #[test]
    fn display_name_must_not_be_blank() {
        assert!(validate_display_name("Skincare").is_ok());
        assert!(validate_display_name("  ").is_err());
    }

    #[test]
    fn resolution_serializes_as_tagged_value() {
        let json = serde_json::to_value(Resolution::Resolved(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "resolved", "id": 3 }));
        let json = serde_json::to_value(Resolution::Unresolved).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "unresolved" }));
    }
}
