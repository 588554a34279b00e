/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test organization/user creation
/// - JWT token generation
/// - Request/response helpers

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use sqlx::PgPool;
use stocklane_api::app::{build_router, AppState};
use stocklane_api::config::Config;
use stocklane_shared::auth::jwt::{create_token, Claims};
use stocklane_shared::auth::password::hash_password;
use stocklane_shared::models::organization::{CreateOrganization, OrgId, Organization};
use stocklane_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Password of the seeded test user (stored hashed)
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub organization: Organization,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a seeded organization and user
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../stocklane-shared/migrations").run(&db).await?;

        // Create test organization
        let organization = Organization::create(
            &db,
            CreateOrganization {
                name: format!("Test Org {}", Uuid::new_v4()),
            },
        )
        .await?;

        // Create test user with a real hash so login works end to end
        let user = User::create(
            &db,
            CreateUser {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash: hash_password(TEST_PASSWORD)?,
                organization_id: organization.id,
            },
        )
        .await?;

        // Generate JWT token
        let claims = Claims::new(user.id, organization.id);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            organization,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Returns the tenant scope of the seeded organization
    pub fn org_id(&self) -> OrgId {
        OrgId(self.organization.id)
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Deleting the organization cascades to users and products
        sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(self.organization.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Builds a request carrying a JSON body, optionally authenticated
pub fn json_request(
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(auth_value) = auth {
        builder = builder.header(header::AUTHORIZATION, auth_value);
    }

    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Builds a bodyless request, optionally authenticated
pub fn empty_request(method: Method, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(auth_value) = auth {
        builder = builder.header(header::AUTHORIZATION, auth_value);
    }

    builder.body(Body::empty()).unwrap()
}

/// Reads a response body as JSON
pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read response body");
    serde_json::from_slice(&bytes).expect("Response should be valid JSON")
}
