//! Domain types and pure logic for the Lustre storefront data layer.
//!
//! Nothing in this crate touches the database or performs I/O. The `db`,
//! `api` and `seeder` crates build on these types.

pub mod error;
pub mod order;
pub mod pagination;
pub mod product;
pub mod roles;
pub mod slug;
pub mod types;
