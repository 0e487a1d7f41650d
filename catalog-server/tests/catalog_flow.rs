//! End-to-end API flow against a real server state: temp work dir, file
//! database with migrations, seed admin bootstrap, full router with
//! authentication.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use catalog_server::api::build_app;
use catalog_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let dir = tempfile::tempdir().expect("create temp work dir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    // Keep the work dir alive for the duration of the test process
    std::mem::forget(dir);

    let state = ServerState::initialize(&config).await;
    build_app(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json body")
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Minimal multipart body with text fields only
fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
) -> Request<Body> {
    let boundary = "----catalog-test-boundary";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

async fn login(app: &Router, identifier: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            None,
            json!({"username": identifier, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    json_body(response).await["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let response = app.oneshot(get_request("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/mylist", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get_request("/api/mylist", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_admin_role_and_duplicates() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            None,
            json!({"username": "mallory", "email": "m@example.com", "password": "pw", "role": "admin"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let alice = json!({"username": "alice", "email": "alice@example.com", "password": "pw123456", "role": "enduser"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/register", None, alice.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["role"], "enduser");
    assert!(body["token"].as_str().is_some());

    // Duplicate username: conflict surfaced as 400 per the API contract
    let response = app
        .oneshot(json_request("POST", "/api/register", None, alice))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_catalog_and_wish_list_flow() {
    let app = test_app().await;

    // Seed admin exists out of the box
    let admin_token = login(&app, "admin", "admin123").await;

    // Non-admin cannot create products
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            None,
            json!({"username": "alice", "email": "alice@example.com", "password": "pw123456", "role": "enduser"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let alice_token = json_body(response).await["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            &alice_token,
            &[("brand", "HP"), ("series", "LaserJet")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin creates a product with a category tag
    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/products",
            &admin_token,
            &[
                ("brand", "HP"),
                ("series", "LaserJet"),
                ("model", "M404dn"),
                ("categories", "hot"),
                ("dealer_price", "199.99"),
                ("end_user_price", "249.99"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let product = json_body(response).await;
    let product_id = product["id"].as_i64().expect("product id");
    assert_eq!(product["name"], "LaserJet");
    assert_eq!(product["categories"], json!(["hot"]));

    // Catalog browse and filters
    let response = app
        .clone()
        .oneshot(get_request("/api/products", None))
        .await
        .unwrap();
    let listing = json_body(response).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get_request("/api/products?search=laser", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get_request("/api/products?search=nomatch", None))
        .await
        .unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(get_request("/api/categories", None))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!(["hot"]));

    // Alice saves the product; a second add conflicts
    let add = json!({"product_id": product_id});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/mylist", Some(&alice_token), add.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/mylist", Some(&alice_token), add))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get_request("/api/mylist", Some(&alice_token)))
        .await
        .unwrap();
    let my_list = json_body(response).await;
    assert_eq!(my_list.as_array().unwrap().len(), 1);
    assert_eq!(my_list[0]["id"].as_i64(), Some(product_id));

    // Send the list, then verify the admin view
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/mylist/send", Some(&alice_token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/sent-lists", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sent_lists = json_body(response).await;
    assert_eq!(sent_lists.as_array().unwrap().len(), 1);
    assert_eq!(sent_lists[0]["username"], "alice");
    assert_eq!(sent_lists[0]["products"][0]["id"].as_i64(), Some(product_id));

    // Admin-only view is closed to Alice
    let response = app
        .clone()
        .oneshot(get_request("/api/sent-lists", Some(&alice_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Deleting the product clears wish lists but leaves the stale snapshot
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/products/{product_id}"));
    builder = builder.header(header::AUTHORIZATION, format!("Bearer {admin_token}"));
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/mylist", Some(&alice_token)))
        .await
        .unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(get_request("/api/sent-lists", Some(&admin_token)))
        .await
        .unwrap();
    let sent_lists = json_body(response).await;
    assert_eq!(sent_lists.as_array().unwrap().len(), 1);
    assert!(sent_lists[0]["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_flow_freezes_role() {
    let app = test_app().await;

    // Unregistered submitter must supply a role
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contact/booking",
            None,
            json!({"email": "new@example.com", "phone": "555", "sender_name": "New", "details": "Repair"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Register a dealer, then submit a booking claiming to be an enduser
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            None,
            json!({"username": "dave", "email": "dave@example.com", "password": "pw123456", "role": "dealer"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contact/booking",
            None,
            json!({"email": "dave@example.com", "phone": "555", "sender_name": "Dave", "details": "Repair", "role": "enduser"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let admin_token = login(&app, "admin", "admin123").await;
    let response = app
        .clone()
        .oneshot(get_request("/api/bookings", Some(&admin_token)))
        .await
        .unwrap();
    let bookings = json_body(response).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
    // The registered account wins over the caller-supplied role
    assert_eq!(bookings[0]["role"], "dealer");
    assert_eq!(bookings[0]["status"], "Registered");

    // No lead row was written for the registered submitter
    let response = app
        .clone()
        .oneshot(get_request("/api/unregistered-customers", Some(&admin_token)))
        .await
        .unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());
}
