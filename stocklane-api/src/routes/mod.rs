/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, me)
/// - `products`: Tenant-scoped catalog CRUD
/// - `dashboard`: Catalog aggregates and low-stock listing
/// - `settings`: Organization-wide default threshold

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod settings;
