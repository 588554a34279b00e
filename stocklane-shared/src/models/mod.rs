/// Database models for Stocklane
///
/// This module contains all database models and their CRUD operations.
/// Every product query takes an [`organization::OrgId`], so tenant
/// scoping is a parameter of the query rather than a convention.
///
/// # Models
///
/// - `organization`: Tenants — the unit of data isolation
/// - `user`: User accounts, each bound to exactly one organization
/// - `product`: The per-organization catalog with stock levels
///
/// # Example
///
/// ```no_run
/// use stocklane_shared::models::user::{User, CreateUser};
/// use stocklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

pub mod organization;
pub mod product;
pub mod user;
