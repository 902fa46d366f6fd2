//! Role names carried in access-token claims.
//!
//! Tokens are issued by the external auth service; these constants must
//! match the role strings it emits.

/// Full catalog administration and access to every order.
pub const ROLE_ADMIN: &str = "admin";

/// Regular storefront shopper.
pub const ROLE_CUSTOMER: &str = "customer";
