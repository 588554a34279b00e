//! # Stocklane Shared Library
//!
//! This crate contains the types, auth primitives, and persistence layer
//! shared by the Stocklane API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing, JWT issuance/validation, auth middleware
//! - `db`: PostgreSQL connection pool and migration runner
//! - `stock`: Low-stock threshold resolution

pub mod auth;
pub mod db;
pub mod models;
pub mod stock;

/// Current version of the Stocklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
