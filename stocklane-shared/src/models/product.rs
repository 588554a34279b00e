/// Product model and tenant-scoped catalog operations
///
/// Products make up the per-organization catalog. Every query in this
/// module takes an [`OrgId`], so there is no way to reach another
/// tenant's rows: a missing product and a cross-tenant product are the
/// same absence.
///
/// SKU uniqueness is per-organization, enforced by the
/// `products_organization_id_sku_key` unique constraint rather than an
/// application-level precheck, so concurrent duplicate submissions
/// cannot race past the check.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id),
///     name VARCHAR(255) NOT NULL,
///     sku VARCHAR(100) NOT NULL,
///     quantity_on_hand INTEGER NOT NULL DEFAULT 0,
///     cost_price DOUBLE PRECISION,
///     selling_price DOUBLE PRECISION,
///     low_stock_threshold INTEGER,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT products_organization_id_sku_key UNIQUE (organization_id, sku)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::organization::OrgId;
use crate::stock::FALLBACK_LOW_STOCK_THRESHOLD;

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID (UUID v4)
    pub id: Uuid,

    /// Owning organization
    pub organization_id: Uuid,

    /// Product name
    pub name: String,

    /// Stock-keeping unit, unique within the organization
    pub sku: String,

    /// Units currently in stock
    pub quantity_on_hand: i32,

    /// Purchase cost per unit
    pub cost_price: Option<f64>,

    /// Sale price per unit
    pub selling_price: Option<f64>,

    /// Per-product low-stock threshold override
    ///
    /// When unset, the organization default applies, then the
    /// hard-coded fallback.
    pub low_stock_threshold: Option<i32>,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product
#[derive(Debug, Clone, Default)]
pub struct CreateProduct {
    /// Product name (required, non-empty)
    pub name: String,

    /// SKU (required, non-empty, unique within the organization)
    pub sku: String,

    /// Initial stock level (0 if unspecified)
    pub quantity_on_hand: i32,

    /// Purchase cost per unit
    pub cost_price: Option<f64>,

    /// Sale price per unit
    pub selling_price: Option<f64>,

    /// Per-product low-stock threshold
    pub low_stock_threshold: Option<i32>,
}

/// Input for partially updating a product
///
/// `None` means "leave the stored value alone". For nullable columns the
/// inner Option distinguishes "set to a value" from "clear to NULL", so
/// an absent request field can never accidentally persist a null.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    /// New product name
    pub name: Option<String>,

    /// New SKU (re-checked for per-organization uniqueness)
    pub sku: Option<String>,

    /// New stock level
    pub quantity_on_hand: Option<i32>,

    /// New cost price (Some(None) clears)
    pub cost_price: Option<Option<f64>>,

    /// New selling price (Some(None) clears)
    pub selling_price: Option<Option<f64>>,

    /// New threshold override (Some(None) clears)
    pub low_stock_threshold: Option<Option<i32>>,
}

impl UpdateProduct {
    /// Returns true when no field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.quantity_on_hand.is_none()
            && self.cost_price.is_none()
            && self.selling_price.is_none()
            && self.low_stock_threshold.is_none()
    }
}

/// Dashboard aggregates for one organization
///
/// Plain data; the API layer copies these fields into its own response
/// shape.
#[derive(Debug, Clone, Copy)]
pub struct CatalogStats {
    /// Number of products in the catalog
    pub total_products: i64,

    /// Sum of quantity_on_hand across the catalog (0 when empty)
    pub total_stock: i64,
}

impl Product {
    /// Lists all products of one organization, newest first
    pub async fn list(pool: &PgPool, org: OrgId) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, organization_id, name, sku, quantity_on_hand,
                   cost_price, selling_price, low_stock_threshold,
                   created_at, updated_at
            FROM products
            WHERE organization_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Finds a product by ID within one organization
    ///
    /// # Returns
    ///
    /// The product if it exists AND belongs to the organization, None
    /// otherwise — a caller cannot tell the two failures apart
    pub async fn find_by_id(
        pool: &PgPool,
        org: OrgId,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, organization_id, name, sku, quantity_on_hand,
                   cost_price, selling_price, low_stock_threshold,
                   created_at, updated_at
            FROM products
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(org)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Creates a new product in one organization's catalog
    ///
    /// # Errors
    ///
    /// Returns a unique-constraint violation when the (organization,
    /// sku) pair already exists; callers translate that into a conflict
    /// response
    pub async fn create(
        pool: &PgPool,
        org: OrgId,
        data: CreateProduct,
    ) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (organization_id, name, sku, quantity_on_hand,
                 cost_price, selling_price, low_stock_threshold)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, name, sku, quantity_on_hand,
                      cost_price, selling_price, low_stock_threshold,
                      created_at, updated_at
            "#,
        )
        .bind(org)
        .bind(data.name)
        .bind(data.sku)
        .bind(data.quantity_on_hand)
        .bind(data.cost_price)
        .bind(data.selling_price)
        .bind(data.low_stock_threshold)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Applies a partial update to a product within one organization
    ///
    /// Reads the current row scoped to the organization, merges the
    /// present fields, and writes the result back. The write is scoped
    /// to the organization again, so the row cannot move between reads.
    ///
    /// # Returns
    ///
    /// The updated product, or None when the product does not exist in
    /// this organization
    ///
    /// # Errors
    ///
    /// Returns a unique-constraint violation when a SKU change collides
    /// within the organization
    pub async fn update(
        pool: &PgPool,
        org: OrgId,
        id: Uuid,
        data: UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, org, id).await? else {
            return Ok(None);
        };

        let name = data.name.unwrap_or(existing.name);
        let sku = data.sku.unwrap_or(existing.sku);
        let quantity_on_hand = data.quantity_on_hand.unwrap_or(existing.quantity_on_hand);
        let cost_price = data.cost_price.unwrap_or(existing.cost_price);
        let selling_price = data.selling_price.unwrap_or(existing.selling_price);
        let low_stock_threshold = data
            .low_stock_threshold
            .unwrap_or(existing.low_stock_threshold);

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $3, sku = $4, quantity_on_hand = $5,
                cost_price = $6, selling_price = $7,
                low_stock_threshold = $8, updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, name, sku, quantity_on_hand,
                      cost_price, selling_price, low_stock_threshold,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(org)
        .bind(name)
        .bind(sku)
        .bind(quantity_on_hand)
        .bind(cost_price)
        .bind(selling_price)
        .bind(low_stock_threshold)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Deletes a product within one organization
    ///
    /// Ownership check and delete are a single statement; zero affected
    /// rows means missing or cross-tenant, which callers report as the
    /// same not-found.
    ///
    /// # Returns
    ///
    /// true when a row was deleted
    pub async fn delete(pool: &PgPool, org: OrgId, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(org)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Computes catalog aggregates for the dashboard
    ///
    /// COALESCE handles the empty catalog: the stock sum is 0, not NULL.
    pub async fn stats(pool: &PgPool, org: OrgId) -> Result<CatalogStats, sqlx::Error> {
        let (total_products, total_stock): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(quantity_on_hand), 0)::BIGINT
            FROM products
            WHERE organization_id = $1
            "#,
        )
        .bind(org)
        .fetch_one(pool)
        .await?;

        Ok(CatalogStats {
            total_products,
            total_stock,
        })
    }

    /// Lists up to `limit` products at or below their effective
    /// low-stock threshold
    ///
    /// The threshold resolution (product override → organization
    /// default → fallback constant) happens in SQL via COALESCE so the
    /// filter runs in one pass over the catalog.
    pub async fn low_stock(
        pool: &PgPool,
        org: OrgId,
        org_default_threshold: Option<i32>,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, organization_id, name, sku, quantity_on_hand,
                   cost_price, selling_price, low_stock_threshold,
                   created_at, updated_at
            FROM products
            WHERE organization_id = $1
              AND quantity_on_hand <= COALESCE(low_stock_threshold, $2, $3)
            ORDER BY created_at
            LIMIT $4
            "#,
        )
        .bind(org)
        .bind(org_default_threshold)
        .bind(FALLBACK_LOW_STOCK_THRESHOLD)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_product_is_empty() {
        assert!(UpdateProduct::default().is_empty());

        let update = UpdateProduct {
            name: Some("Widget".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        // Clearing a nullable column still counts as a change
        let update = UpdateProduct {
            low_stock_threshold: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            name: "Widget".to_string(),
            sku: "W1".to_string(),
            quantity_on_hand: 3,
            cost_price: None,
            selling_price: Some(9.5),
            low_stock_threshold: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("quantityOnHand").is_some());
        assert!(json.get("lowStockThreshold").is_some());
        assert_eq!(json["quantityOnHand"], 3);
        assert!(json["costPrice"].is_null());
    }
}
