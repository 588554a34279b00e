/// Organization settings endpoints
///
/// # Endpoints
///
/// - `GET /api/settings` - Read the organization-wide default low-stock
///   threshold (nullable)
/// - `PUT /api/settings` - Set it
///
/// The stored value must be a non-negative integer; a negative
/// threshold would mark nothing as low-stock and is rejected with 400.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};
use stocklane_shared::{auth::middleware::AuthContext, models::organization::Organization};
use validator::Validate;

/// Settings response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Organization-wide default low-stock threshold, None when unset
    pub default_low_stock_threshold: Option<i32>,
}

/// Settings update request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// New organization-wide default threshold
    #[validate(range(min = 0, message = "Threshold must be non-negative"))]
    pub default_low_stock_threshold: i32,
}

/// Reads the organization's default low-stock threshold
///
/// # Errors
///
/// - `404 Not Found`: Organization missing (only possible if it was
///   removed out-of-band; organizations are never deleted in-app)
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<SettingsResponse>> {
    let threshold = Organization::default_threshold(&state.db, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;

    Ok(Json(SettingsResponse {
        default_low_stock_threshold: threshold,
    }))
}

/// Updates the organization's default low-stock threshold
///
/// # Errors
///
/// - `400 Bad Request`: Missing or negative value
/// - `404 Not Found`: Organization missing
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let organization = Organization::set_default_threshold(
        &state.db,
        auth.org_id,
        req.default_low_stock_threshold,
    )
    .await?;

    Ok(Json(SettingsResponse {
        default_low_stock_threshold: organization.default_low_stock_threshold,
    }))
}
