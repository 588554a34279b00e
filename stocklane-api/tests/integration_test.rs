/// End-to-end API tests
///
/// These tests exercise the full HTTP surface against a real PostgreSQL
/// database: registration, login, the product catalog, the dashboard,
/// and organization settings. Each test seeds its own organization so
/// tests can run concurrently without stepping on each other.
///
/// Run with: `cargo test -- --ignored` (requires DATABASE_URL and
/// JWT_SECRET in the environment or a .env file)

mod common;

use axum::http::{Method, StatusCode};
use common::{empty_request, json_request, response_json, TestContext, TEST_PASSWORD};
use serde_json::json;
use tower::ServiceExt as _;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_health_check() {
    let ctx = TestContext::new().await.expect("Should create context");

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_then_login() {
    let ctx = TestContext::new().await.expect("Should create context");

    let email = format!("owner-{}@example.com", Uuid::new_v4());
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            &json!({
                "email": email,
                "password": "a-strong-password",
                "organizationName": "Registered Org"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The new credentials must immediately work for login
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": email, "password": "a-strong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert_eq!(body["user"]["organization"]["name"], "Registered Org");

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_duplicate_email_conflicts() {
    let ctx = TestContext::new().await.expect("Should create context");

    // Seeded user's email, different casing; unique org name so the
    // rollback check below cannot collide with other tests
    let org_name = format!("Orphan Check {}", Uuid::new_v4());
    let payload = json!({
        "email": ctx.user.email.to_uppercase(),
        "password": "a-strong-password",
        "organizationName": org_name
    });

    let response = ctx
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/api/auth/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The organization insert succeeded inside register's transaction
    // before the user insert hit the email constraint; the 409 must
    // leave no orphaned organization behind
    let (orphans,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM organizations WHERE name = $1")
            .bind(&org_name)
            .fetch_one(&ctx.db)
            .await
            .expect("Count query should run");
    assert_eq!(orphans, 0, "No orphaned organization after a 409");

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_rejects_invalid_payload() {
    let ctx = TestContext::new().await.expect("Should create context");

    // Short password and malformed email
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            &json!({
                "email": "not-an-email",
                "password": "short",
                "organizationName": "Org"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new().await.expect("Should create context");

    let wrong_password = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": ctx.user.email, "password": "not-the-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = response_json(wrong_password).await;

    let unknown_email = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            &json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body = response_json(unknown_email).await;

    // Same status, same message: no account enumeration
    assert_eq!(wrong_password_body["message"], unknown_email_body["message"]);

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_me_returns_current_user() {
    let ctx = TestContext::new().await.expect("Should create context");

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/auth/me",
            Some(&ctx.auth_header()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["user"]["id"], ctx.user.id.to_string());
    assert_eq!(body["user"]["organizationId"], ctx.organization.id.to_string());

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_product_crud_flow() {
    let ctx = TestContext::new().await.expect("Should create context");
    let auth = ctx.auth_header();

    // Create
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(&auth),
            &json!({
                "name": "Widget",
                "sku": "WID-001",
                "quantity": 12,
                "selling_price": 9.99
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let product_id = body["product"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["product"]["quantityOnHand"], 12);
    assert!(body["product"]["costPrice"].is_null());

    // List
    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/products", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 1);

    // Partial update: change quantity, clear selling price, leave name alone
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/products/{}", product_id),
            Some(&auth),
            &json!({ "quantity": 3, "selling_price": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["product"]["name"], "Widget");
    assert_eq!(body["product"]["quantityOnHand"], 3);
    assert!(body["product"]["sellingPrice"].is_null());

    // Delete
    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/products/{}", product_id),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a miss
    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/products/{}", product_id),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_duplicate_sku_within_org_conflicts() {
    let ctx = TestContext::new().await.expect("Should create context");
    let auth = ctx.auth_header();

    let payload = json!({ "name": "Widget", "sku": "DUP-001" });

    let response = ctx
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/api/products", Some(&auth), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/api/products", Some(&auth), &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A different organization may reuse the SKU
    let other = TestContext::new().await.expect("Should create context");
    let response = other
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(&other.auth_header()),
            &payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    other.cleanup().await.expect("Should cleanup");
    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_cross_tenant_access_is_a_miss() {
    let ctx_a = TestContext::new().await.expect("Should create context");
    let ctx_b = TestContext::new().await.expect("Should create context");

    let response = ctx_a
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(&ctx_a.auth_header()),
            &json!({ "name": "Secret", "sku": "SEC-001" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let product_id = body["product"]["id"].as_str().unwrap().to_string();

    // Tenant B cannot see, update, or delete tenant A's product. The
    // responses must not reveal that the product exists at all.
    let response = ctx_b
        .app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/products",
            Some(&ctx_b.auth_header()),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body["products"].as_array().unwrap().is_empty());

    let response = ctx_b
        .app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/products/{}", product_id),
            Some(&ctx_b.auth_header()),
            &json!({ "name": "Hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx_b
        .app
        .clone()
        .oneshot(empty_request(
            Method::DELETE,
            &format!("/api/products/{}", product_id),
            Some(&ctx_b.auth_header()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx_b.cleanup().await.expect("Should cleanup");
    ctx_a.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_dashboard_aggregates_and_low_stock() {
    let ctx = TestContext::new().await.expect("Should create context");
    let auth = ctx.auth_header();

    // Two products: one well stocked, one at the fallback threshold
    for payload in [
        json!({ "name": "Plenty", "sku": "PL-001", "quantity": 100 }),
        json!({ "name": "Scarce", "sku": "SC-001", "quantity": 5 }),
    ] {
        let response = ctx
            .app
            .clone()
            .oneshot(json_request(Method::POST, "/api/products", Some(&auth), &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/dashboard", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["totalProducts"], 2);
    assert_eq!(body["totalStock"], 105);

    let low = body["lowStockItems"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["sku"], "SC-001");

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_dashboard_empty_catalog_is_all_zeroes() {
    let ctx = TestContext::new().await.expect("Should create context");

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/dashboard",
            Some(&ctx.auth_header()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["totalProducts"], 0);
    assert_eq!(body["totalStock"], 0);
    assert!(body["lowStockItems"].as_array().unwrap().is_empty());

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_settings_roundtrip() {
    let ctx = TestContext::new().await.expect("Should create context");
    let auth = ctx.auth_header();

    // Fresh organization has no default configured
    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/settings", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["defaultLowStockThreshold"].is_null());

    // Set a default, read it back
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/settings",
            Some(&auth),
            &json!({ "defaultLowStockThreshold": 10 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/settings", Some(&auth)))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["defaultLowStockThreshold"], 10);

    // Negative thresholds are rejected
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/settings",
            Some(&auth),
            &json!({ "defaultLowStockThreshold": -1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.expect("Should cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_org_default_drives_low_stock_selection() {
    let ctx = TestContext::new().await.expect("Should create context");
    let auth = ctx.auth_header();

    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(&auth),
            &json!({ "name": "Widget", "sku": "ORG-001", "quantity": 8 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Under the fallback threshold of 5, a quantity of 8 is healthy
    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/dashboard", Some(&auth)))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body["lowStockItems"].as_array().unwrap().is_empty());

    // Raising the organization default to 10 puts it below threshold
    let response = ctx
        .app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/settings",
            Some(&auth),
            &json!({ "defaultLowStockThreshold": 10 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/dashboard", Some(&auth)))
        .await
        .unwrap();
    let body = response_json(response).await;
    let low = body["lowStockItems"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["sku"], "ORG-001");

    ctx.cleanup().await.expect("Should cleanup");
}
