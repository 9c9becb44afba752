//! Wrapper behavior against an in-process mock backend

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use eventmart_api_client::{
    AccountStatus, ApiError, ClientConfig, Credentials, MarketplaceClient,
};
use eventmart_core::Role;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

async fn vendor_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "hello@aurora.io" && body["password"] == "Str0ng!Pass" {
        (
            StatusCode::OK,
            Json(json!({"accessToken": "vendor-token", "vendor": {"_id": "v1"}})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid email or password"})),
        )
    }
}

async fn admin_vendors(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = q.get("pageNo").and_then(|p| p.parse().ok()).unwrap_or(0);
    Json(json!({
        "vendors": [{
            "_id": format!("v{page}"),
            "name": "Aurora Events",
            "email": "hello@aurora.io",
            "status": "blocked",
            "createdAt": "2024-03-01T10:00:00Z"
        }],
        "totalPages": 4,
        "currentPage": page
    }))
}

async fn admin_clients(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer admin-token") => (StatusCode::OK, Json(json!({"clients": []}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        ),
    }
}

async fn block_client() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Client already blocked"})),
    )
}

async fn block_vendor() -> (StatusCode, Json<Value>) {
    // Uses the key the admin block-vendor endpoint does not read
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "db timeout"})),
    )
}

async fn update_vendor_status(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"message": format!("Vendor {} is now {}", body["vendorId"].as_str().unwrap_or(""), body["newStatus"].as_str().unwrap_or(""))}))
}

async fn vendor_events() -> &'static str {
    "{\"unexpected\": true}"
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/vendor/login", post(vendor_login))
        .route("/vendor/events", get(vendor_events))
        .route("/admin/vendors", get(admin_vendors))
        .route("/admin/clients", get(admin_clients))
        .route("/admin/blockClient", patch(block_client))
        .route("/admin/blockVendor", patch(block_vendor))
        .route("/admin/updateVendorStatus", patch(update_vendor_status));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> MarketplaceClient {
    let base = spawn_backend().await;
    MarketplaceClient::with_config(
        ClientConfig::default()
            .with_base_url(base)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn vendor_login_returns_body_unchanged() {
    let client = client().await;
    let login = client
        .vendor()
        .login(&Credentials::new("hello@aurora.io", "Str0ng!Pass"))
        .await
        .unwrap();

    assert_eq!(login.access_token, "vendor-token");
    assert_eq!(login.account.id, "v1");
}

#[tokio::test]
async fn rejected_login_surfaces_backend_error_verbatim() {
    let client = client().await;
    let err = client
        .vendor()
        .login(&Credentials::new("hello@aurora.io", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Invalid email or password");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn list_endpoints_send_page_number() {
    let client = client().await;
    let page = client.admin().vendors(3).await.unwrap();

    assert_eq!(page.current_page, 3);
    assert_eq!(page.items[0].id, "v3");
    assert_eq!(page.items[0].status, AccountStatus::Blocked);
    assert!(page.has_next());
}

#[tokio::test]
async fn bearer_token_is_sent_for_the_calling_role() {
    let client = client().await;

    let err = client.admin().clients(1).await.unwrap_err();
    assert_eq!(err.message(), "Unauthorized");

    // A vendor token does not authorize admin calls
    client.tokens().set(Role::Vendor, "admin-token");
    assert!(client.admin().clients(1).await.is_err());

    client.tokens().set(Role::Admin, "admin-token");
    let page = client.admin().clients(1).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn error_key_is_read_per_endpoint() {
    let client = client().await;

    let err = client.admin().block_client("c1").await.unwrap_err();
    assert_eq!(err.message(), "Client already blocked");
    assert_eq!(err.status(), Some(400));

    let err = client.admin().block_vendor("v1").await.unwrap_err();
    assert_eq!(err.message(), "Failed to block vendor");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_success_body_uses_fallback() {
    let client = client().await;
    let err = client.vendor().events(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert_eq!(err.message(), "Failed to fetch events");
}

#[tokio::test]
async fn unknown_route_uses_fallback() {
    let client = client().await;
    let err = client.admin().rejected_vendors(1).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Failed to fetch rejected vendors");
}

#[tokio::test]
async fn approve_sends_new_status() {
    let client = client().await;
    let ack = client
        .admin()
        .update_vendor_status(&eventmart_api_client::endpoints::admin::VendorStatusUpdate::approve("v7"))
        .await
        .unwrap();

    assert_eq!(ack.message.as_deref(), Some("Vendor v7 is now active"));
}
