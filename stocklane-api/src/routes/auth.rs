/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register an organization and its first user
/// - `POST /api/auth/login` - Login and receive a token
/// - `GET /api/auth/me` - Current authenticated user
///
/// The token is delivered in the login response body and presented back
/// as an `Authorization: Bearer` header; the server never sets cookies.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::{Deserialize, Serialize};
use stocklane_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::{
        organization::{CreateOrganization, Organization},
        user::{CreateUser, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Name for the new organization
    #[validate(length(
        min = 1,
        max = 255,
        message = "Organization name must be between 1 and 255 characters"
    ))]
    pub organization_name: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Organization summary embedded in user payloads
#[derive(Debug, Serialize)]
pub struct OrganizationSummary {
    /// Organization ID
    pub id: Uuid,

    /// Organization name
    pub name: String,
}

/// User payload returned by login and `me`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Owning organization ID
    pub organization_id: Uuid,

    /// Owning organization
    pub organization: OrganizationSummary,
}

impl UserPayload {
    fn new(user: &User, organization: &Organization) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            organization_id: user.organization_id,
            organization: OrganizationSummary {
                id: organization.id,
                name: organization.name.clone(),
            },
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed identity assertion, valid for 7 days
    pub token: String,

    /// Authenticated user
    pub user: UserPayload,
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Authenticated user
    pub user: UserPayload,
}

/// Register a new organization with its first user
///
/// Both rows are created in one transaction: a failure on the user
/// insert (for example a duplicate email) rolls the organization back,
/// so no orphaned organization can exist.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123",
///   "organizationName": "Acme"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let password_hash = password::hash_password(&req.password)?;

    // Organization and first user are all-or-nothing; an early return
    // drops the transaction and rolls both inserts back
    let mut tx = state.db.begin().await.map_err(ApiError::from)?;

    let organization = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: req.organization_name,
        },
    )
    .await?;

    User::create(
        &mut *tx,
        CreateUser {
            email: req.email.to_lowercase(),
            password_hash,
            organization_id: organization.id,
        },
    )
    .await?;

    tx.commit().await.map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns a token plus the user payload.
/// Unknown email and wrong password produce the identical 401 — the
/// response never reveals which field was wrong.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let organization = Organization::find_by_id(&state.db, user.organization_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("User has no organization".to_string()))?;

    User::update_last_login(&state.db, user.id).await?;

    let claims = jwt::Claims::new(user.id, user.organization_id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        token,
        user: UserPayload::new(&user, &organization),
    }))
}

/// Current-user endpoint
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: User deleted after the token was issued
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MeResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let organization = Organization::find_by_id(&state.db, user.organization_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("User has no organization".to_string()))?;

    Ok(Json(MeResponse {
        user: UserPayload::new(&user, &organization),
    }))
}
