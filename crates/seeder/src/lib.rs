//! Catalog seeding: destructive reload of reference data and products from
//! declarative JSON documents.
//!
//! Seeding is an operator-run maintenance task. Two concurrent runs can
//! interleave their delete/insert phases; do not start one while another
//! is in progress.

pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod source;

pub use error::SeedError;
pub use loader::CatalogLoader;
pub use report::SeedReport;
pub use source::{ProductSource, SeedSource};
