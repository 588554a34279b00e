/// The access guard
///
/// This module validates the Bearer token on incoming requests: it
/// extracts the token from the `Authorization` header, validates it,
/// and produces an [`AuthContext`]. Handlers behind the guard may
/// assume the context is present and trustworthy — the guard is the
/// sole enforcement point and no handler re-checks it.
///
/// The token transport is the `Authorization: Bearer <token>` header
/// only. Cookies are never consulted.
///
/// # Example
///
/// ```no_run
/// use axum::http::HeaderMap;
/// use stocklane_shared::auth::middleware::authenticate_request;
///
/// # fn example(headers: &HeaderMap) {
/// if let Ok(auth) = authenticate_request(headers, "your-jwt-secret") {
///     println!("user {} of org {}", auth.user_id, auth.org_id);
/// }
/// # }
/// ```

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};
use crate::models::organization::OrgId;

/// Authentication context added to request extensions
///
/// Carries the resolved identity for the lifetime of one request. The
/// `org_id` is the tenant-scoping capability: every catalog query takes
/// it as a mandatory parameter, so an unscoped query does not compile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Organization the user belongs to
    pub org_id: OrgId,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(user_id: Uuid, org_id: Uuid) -> Self {
        Self {
            user_id,
            org_id: OrgId(org_id),
        }
    }
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            // A malformed header is still an authentication failure;
            // callers cannot distinguish it from a bad token
            AuthError::InvalidFormat(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Extracts and validates the Bearer token from request headers
///
/// This is the single enforcement point for the identity assertion;
/// the API server's auth layer wraps it in an axum middleware and
/// injects the resulting context into request extensions.
///
/// # Errors
///
/// - `MissingCredentials` when the Authorization header is absent
/// - `InvalidFormat` when the header is present but not in Bearer form
/// - `InvalidToken` when validation fails for any reason (bad
///   signature, malformed payload, wrong issuer, expired)
pub fn authenticate_request(
    headers: &axum::http::HeaderMap,
    secret: &str,
) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken("Invalid or expired token".to_string()),
    })?;

    Ok(AuthContext::from_claims(claims.sub, claims.org_id))
}
