/// Tenant-scoped catalog endpoints
///
/// # Endpoints
///
/// - `GET    /api/products` - List the organization's products
/// - `POST   /api/products` - Create a product
/// - `PUT    /api/products/:id` - Partially update a product
/// - `DELETE /api/products/:id` - Delete a product
///
/// Every handler takes the tenant scope from the access guard's
/// [`AuthContext`] — never from the request body or query string. A
/// product that exists but belongs to another organization produces the
/// same 404 as one that does not exist at all.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::{Deserialize, Deserializer, Serialize};
use stocklane_shared::{
    auth::middleware::AuthContext,
    models::product::{CreateProduct, Product, UpdateProduct},
};
use uuid::Uuid;
use validator::Validate;

/// Deserializes a field that may be absent, null, or a value
///
/// Plain `Option<T>` collapses "absent" and "null"; wrapping in a
/// second Option keeps them apart so a partial update can distinguish
/// "leave alone" from "clear to NULL".
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Create product request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name (required, non-empty)
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,

    /// SKU (required, non-empty, unique within the organization)
    #[validate(length(min = 1, max = 100, message = "SKU must not be empty"))]
    pub sku: String,

    /// Initial stock level (0 if unspecified)
    pub quantity: Option<i32>,

    /// Purchase cost per unit
    pub cost_price: Option<f64>,

    /// Sale price per unit
    pub selling_price: Option<f64>,

    /// Per-product low-stock threshold
    #[serde(rename = "lowStockThreshold")]
    pub low_stock_threshold: Option<i32>,
}

/// Update product request
///
/// Only fields present in the request mutate stored state.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New product name
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,

    /// New SKU
    #[validate(length(min = 1, max = 100, message = "SKU must not be empty"))]
    pub sku: Option<String>,

    /// New stock level
    pub quantity: Option<i32>,

    /// New cost price (null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub cost_price: Option<Option<f64>>,

    /// New selling price (null clears)
    #[serde(default, deserialize_with = "double_option")]
    pub selling_price: Option<Option<f64>>,

    /// New threshold override (null clears)
    #[serde(
        rename = "lowStockThreshold",
        default,
        deserialize_with = "double_option"
    )]
    pub low_stock_threshold: Option<Option<i32>>,
}

/// Product list response
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// The organization's catalog, newest first
    pub products: Vec<Product>,
}

/// Single product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// The created or updated product
    pub product: Product,
}

/// Deletion confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Lists all products of the caller's organization, newest first
pub async fn list_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProductsResponse>> {
    let products = Product::list(&state.db, auth.org_id).await?;

    Ok(Json(ProductsResponse { products }))
}

/// Creates a product in the caller's organization
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty name/SKU
/// - `409 Conflict`: SKU already exists within the organization
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let product = Product::create(
        &state.db,
        auth.org_id,
        CreateProduct {
            name: req.name,
            sku: req.sku,
            quantity_on_hand: req.quantity.unwrap_or(0),
            cost_price: req.cost_price,
            selling_price: req.selling_price,
            low_stock_threshold: req.low_stock_threshold,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// Partially updates a product in the caller's organization
///
/// # Errors
///
/// - `400 Bad Request`: Present field is empty, or no fields at all
/// - `404 Not Found`: Product missing or owned by another organization
/// - `409 Conflict`: SKU change collides within the organization
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let update = UpdateProduct {
        name: req.name,
        sku: req.sku,
        quantity_on_hand: req.quantity,
        cost_price: req.cost_price,
        selling_price: req.selling_price,
        low_stock_threshold: req.low_stock_threshold,
    };

    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let product = Product::update(&state.db, auth.org_id, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductResponse { product }))
}

/// Deletes a product in the caller's organization
///
/// Deletion is immediate and unrecoverable; there is no soft-delete.
///
/// # Errors
///
/// - `404 Not Found`: Product missing or owned by another organization
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Product::delete(&state.db, auth.org_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
