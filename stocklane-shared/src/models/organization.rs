/// Organization model and database operations
///
/// Organizations are the tenant boundary: every user and every product
/// belongs to exactly one. Organizations are created during
/// registration (in the same transaction as their first user) and are
/// never deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     default_low_stock_threshold INTEGER,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use uuid::Uuid;

/// Tenant-scoping capability
///
/// A transparent newtype over the organization UUID. Handlers obtain it
/// only from a validated [`AuthContext`](crate::auth::middleware::AuthContext),
/// and every catalog query requires one, which keeps tenant isolation a
/// type-level guarantee instead of a per-handler convention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct OrgId(pub Uuid);

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Organization model representing a tenant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization ID (UUID v4)
    pub id: Uuid,

    /// Organization name
    pub name: String,

    /// Organization-wide low-stock threshold
    ///
    /// Used when a product has no threshold of its own. When this is
    /// also unset, the hard-coded fallback in [`crate::stock`] applies.
    pub default_low_stock_threshold: Option<i32>,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Organization name
    pub name: String,
}

impl Organization {
    /// Creates a new organization
    ///
    /// Takes any executor so registration can run it inside the same
    /// transaction as the user insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateOrganization,
    ) -> Result<Self, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name)
            VALUES ($1)
            RETURNING id, name, default_low_stock_threshold, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .fetch_one(executor)
        .await?;

        Ok(organization)
    }

    /// Finds an organization by ID
    ///
    /// # Returns
    ///
    /// The organization if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, default_low_stock_threshold, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Reads the organization-wide default low-stock threshold
    ///
    /// The outer Option distinguishes "organization missing" from
    /// "threshold not configured".
    pub async fn default_threshold(
        pool: &PgPool,
        org: OrgId,
    ) -> Result<Option<Option<i32>>, sqlx::Error> {
        let row: Option<(Option<i32>,)> = sqlx::query_as(
            r#"
            SELECT default_low_stock_threshold
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(org)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(threshold,)| threshold))
    }

    /// Updates the organization-wide default low-stock threshold
    ///
    /// # Returns
    ///
    /// The updated organization
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::RowNotFound` if the organization does not
    /// exist
    pub async fn set_default_threshold(
        pool: &PgPool,
        org: OrgId,
        threshold: i32,
    ) -> Result<Self, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations
            SET default_low_stock_threshold = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, default_low_stock_threshold, created_at, updated_at
            "#,
        )
        .bind(org)
        .bind(threshold)
        .fetch_one(pool)
        .await?;

        Ok(organization)
    }
}
