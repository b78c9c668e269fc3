//! Customer API HTTP handler tests

use super::{
    build_test_router, get_json, get_json_with_auth, post_json, post_json_with_auth,
    put_json_with_auth, send, TestAppState,
};
use crate::api::{create_test_customer, test_jwt_config, token_for};
use axum::http::{Method, StatusCode};
use miniature::api::{MessageResponse, TokenResponse};
use miniature::config::JwtConfig;
use miniature::domain::Customer;
use miniature::jwt::JwtManager;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_returns_201_with_customer() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Customer>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "phone": "0912-123-4567", "name": "  Alice ", "role": "owner" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let customer = body.unwrap();
    assert_eq!(customer.phone, "09121234567");
    assert_eq!(customer.name, "Alice");
    assert_eq!(customer.role, "OWNER");
    assert_eq!(customer.total_spent, 0.0);
    assert_eq!(customer.cashback_balance, 0.0);
    assert!(customer.is_active);
    assert_eq!(customer.version, 1);

    assert!(state.customer_repo.get(customer.id).await.is_some());
}

#[tokio::test]
async fn test_register_defaults_role_to_customer() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Customer>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "phone": "09121234568", "name": "Bob" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap().role, "CUSTOMER");
}

#[tokio::test]
async fn test_register_duplicate_phone_returns_409() {
    let state = TestAppState::new();
    state
        .customer_repo
        .add_customer(create_test_customer("09121234567", "CUSTOMER"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "phone": "09121234567", "name": "Again" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["error"], "conflict");
}

#[tokio::test]
async fn test_register_invalid_phone_returns_400() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "phone": "call me", "name": "Mallory" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = body.unwrap();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_malformed_json_returns_400_json() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = send(
        &app,
        Method::POST,
        "/v1/customer/register",
        None,
        Some("{\"phone\": ".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "bad_request");
}

#[tokio::test]
async fn test_register_missing_field_returns_400() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "name": "No Phone" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "bad_request");
}

// ============================================================================
// Login / Logout
// ============================================================================

#[tokio::test]
async fn test_login_returns_token_for_registered_phone() {
    let state = TestAppState::new();
    let customer = create_test_customer("09121234569", "SELLER");
    state.customer_repo.add_customer(customer.clone()).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<TokenResponse>) = post_json(
        &app,
        "/v1/customer/login",
        &json!({ "phone": "0912 123 4569" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.token_type, "Bearer");
    assert_eq!(body.expires_in, 3600);

    let claims = state.jwt_manager.validate(&body.token).unwrap();
    assert_eq!(claims.sub, customer.id.to_string());
    assert_eq!(claims.role, "SELLER");
}

#[tokio::test]
async fn test_login_unknown_phone_returns_401() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/v1/customer/login",
        &json!({ "phone": "09120000000" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body = body.unwrap();
    assert_eq!(body["error"], "unauthorized");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_inactive_customer_returns_403() {
    let state = TestAppState::new();
    let mut customer = create_test_customer("09121234570", "CUSTOMER");
    customer.is_active = false;
    state.customer_repo.add_customer(customer).await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/v1/customer/login",
        &json!({ "phone": "09121234570" }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_then_me_round_trip() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, registered): (StatusCode, Option<Customer>) = post_json(
        &app,
        "/v1/customer/register",
        &json!({ "phone": "09121112222", "name": "Dana" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let registered = registered.unwrap();

    let (_, token): (StatusCode, Option<TokenResponse>) = post_json(
        &app,
        "/v1/customer/login",
        &json!({ "phone": "09121112222" }),
    )
    .await;
    let token = token.unwrap().token;

    let (status, me): (StatusCode, Option<Customer>) =
        get_json_with_auth(&app, "/v1/customer/me", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(me.unwrap(), registered);
}

#[tokio::test]
async fn test_logout_returns_message() {
    let state = TestAppState::new();
    let customer = create_test_customer("09121234567", "CUSTOMER");
    state.customer_repo.add_customer(customer.clone()).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<MessageResponse>) = post_json_with_auth(
        &app,
        "/v1/customer/logout",
        &json!({}),
        &token_for(&customer),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.unwrap().message.is_empty());
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<Value>) =
        post_json(&app, "/v1/customer/logout", &json!({})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Me
// ============================================================================

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/v1/customer/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["error"], "unauthorized");
}

#[tokio::test]
async fn test_me_with_garbage_token_returns_401() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<Value>) =
        get_json_with_auth(&app, "/v1/customer/me", "not.a.token").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_non_bearer_scheme_returns_401() {
    let app = build_test_router(TestAppState::new());
    let request = axum::http::Request::builder()
        .uri("/v1/customer/me")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_expired_token_returns_401() {
    let state = TestAppState::new();
    let customer = create_test_customer("09121234567", "CUSTOMER");
    state.customer_repo.add_customer(customer.clone()).await;
    let app = build_test_router(state);

    let expired = JwtManager::new(JwtConfig {
        token_ttl_secs: -120,
        ..test_jwt_config()
    })
    .issue(&customer.id.to_string(), &customer.role)
    .unwrap();

    let (status, _): (StatusCode, Option<Value>) =
        get_json_with_auth(&app, "/v1/customer/me", &expired).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_removed_customer_returns_404() {
    let app = build_test_router(TestAppState::new());
    let ghost = create_test_customer("09129999999", "CUSTOMER");

    let (status, body): (StatusCode, Option<Value>) =
        get_json_with_auth(&app, "/v1/customer/me", &token_for(&ghost)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "not_found");
}

#[tokio::test]
async fn test_update_me_changes_name_only() {
    let state = TestAppState::new();
    let customer = create_test_customer("09121234567", "CUSTOMER");
    state.customer_repo.add_customer(customer.clone()).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Customer>) = put_json_with_auth(
        &app,
        "/v1/customer/me",
        &json!({ "name": "Renamed" }),
        &token_for(&customer),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = body.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.phone, customer.phone);
    assert_eq!(updated.role, customer.role);
    assert_eq!(updated.version, 2);

    let stored = state.customer_repo.get(customer.id).await.unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_update_me_to_taken_phone_returns_409() {
    let state = TestAppState::new();
    let alice = create_test_customer("09121234567", "CUSTOMER");
    let bob = create_test_customer("09121234568", "CUSTOMER");
    state.customer_repo.add_customer(alice.clone()).await;
    state.customer_repo.add_customer(bob).await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json_with_auth(
        &app,
        "/v1/customer/me",
        &json!({ "phone": "09121234568" }),
        &token_for(&alice),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_me_ignores_privileged_fields() {
    let state = TestAppState::new();
    let customer = create_test_customer("09121234567", "CUSTOMER");
    state.customer_repo.add_customer(customer.clone()).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Customer>) = put_json_with_auth(
        &app,
        "/v1/customer/me",
        &json!({ "role": "OWNER", "cashback_balance": 1000.0 }),
        &token_for(&customer),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = body.unwrap();
    assert_eq!(updated.role, "CUSTOMER");
    assert_eq!(updated.cashback_balance, 0.0);
}
