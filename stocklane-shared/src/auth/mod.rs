/// Authentication utilities
///
/// This module provides the authentication primitives for Stocklane:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed identity assertions binding a user to an organization
/// - [`middleware`]: the access guard that turns a Bearer token into an
///   [`middleware::AuthContext`]
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256-signed, 7-day expiry, no refresh and no revocation
/// - **Transport**: `Authorization: Bearer <token>` header only; the
///   server never reads tokens from cookies
///
/// # Example
///
/// ```no_run
/// use stocklane_shared::auth::password::{hash_password, verify_password};
/// use stocklane_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), Uuid::new_v4());
/// let token = create_token(&claims, "secret-key")?;
/// let validated = validate_token(&token, "secret-key")?;
/// assert_eq!(validated.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
