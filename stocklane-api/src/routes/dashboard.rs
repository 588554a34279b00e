/// Dashboard endpoint
///
/// # Endpoint
///
/// - `GET /api/dashboard` - Catalog aggregates for the caller's
///   organization
///
/// # Response
///
/// ```json
/// {
///   "totalProducts": 12,
///   "totalStock": 340,
///   "lowStockItems": [ ... up to 5 products ... ]
/// }
/// ```
///
/// A product is low-stock when its quantity on hand is at or below its
/// effective threshold: the product's own override, else the
/// organization default, else the hard-coded fallback of 5.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use serde::Serialize;
use stocklane_shared::{
    auth::middleware::AuthContext,
    models::{organization::Organization, product::Product},
};

/// How many low-stock items the dashboard lists at most
const LOW_STOCK_LIMIT: i64 = 5;

/// Dashboard response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Number of products in the catalog
    pub total_products: i64,

    /// Sum of stock on hand across the catalog (0 when empty)
    pub total_stock: i64,

    /// Up to 5 products at or below their effective threshold
    pub low_stock_items: Vec<Product>,
}

/// Dashboard handler
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardResponse>> {
    let stats = Product::stats(&state.db, auth.org_id).await?;

    // Flattened: a missing organization behaves like an unset default
    let org_default = Organization::default_threshold(&state.db, auth.org_id)
        .await?
        .flatten();

    let low_stock_items =
        Product::low_stock(&state.db, auth.org_id, org_default, LOW_STOCK_LIMIT).await?;

    Ok(Json(DashboardResponse {
        total_products: stats.total_products,
        total_stock: stats.total_stock,
        low_stock_items,
    }))
}
