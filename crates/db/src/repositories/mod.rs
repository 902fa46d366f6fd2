//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods the catalog loader
//! runs inside a transaction take `&mut PgConnection` instead.

pub mod brand_repo;
pub mod category_repo;
pub mod order_repo;
pub mod product_repo;

pub use brand_repo::BrandRepo;
pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
