//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation. Tokens are issued by the external
//!   auth service; this server only verifies them.

pub mod jwt;
