//! HTTP handler tests
//!
//! Requests go through the production router built by `build_router`, with
//! `TestAppState` supplying in-memory repositories.

pub mod customer_http_test;
pub mod system_http_test;

use crate::api::{
    test_config, create_test_jwt_manager, TestCustomerRepository, TestOwnershipChecker,
    TestProductRepository, TestShopRepository,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use miniature::config::Config;
use miniature::jwt::JwtManager;
use miniature::server::build_router;
use miniature::service::{CustomerService, ProductService, ShopService};
use miniature::state::HasServices;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test App State
// ============================================================================

#[derive(Clone)]
pub struct TestAppState {
    pub config: Arc<Config>,
    pub customer_service: Arc<CustomerService<TestCustomerRepository>>,
    pub shop_service: Arc<ShopService<TestShopRepository>>,
    pub product_service: Arc<ProductService<TestProductRepository, TestOwnershipChecker>>,
    pub jwt_manager: JwtManager,
    pub customer_repo: Arc<TestCustomerRepository>,
    pub shop_repo: Arc<TestShopRepository>,
    pub product_repo: Arc<TestProductRepository>,
    pub ownership: Arc<TestOwnershipChecker>,
}

impl TestAppState {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let customer_repo = Arc::new(TestCustomerRepository::new());
        let shop_repo = Arc::new(TestShopRepository::new());
        let product_repo = Arc::new(TestProductRepository::new(shop_repo.clone()));
        let ownership = Arc::new(TestOwnershipChecker::new(shop_repo.clone()));

        Self {
            config: Arc::new(config),
            customer_service: Arc::new(CustomerService::new(customer_repo.clone())),
            shop_service: Arc::new(ShopService::new(shop_repo.clone())),
            product_service: Arc::new(ProductService::new(
                product_repo.clone(),
                ownership.clone(),
            )),
            jwt_manager: create_test_jwt_manager(),
            customer_repo,
            shop_repo,
            product_repo,
            ownership,
        }
    }
}

impl HasServices for TestAppState {
    type CustomerRepo = TestCustomerRepository;
    type ShopRepo = TestShopRepository;
    type ProductRepo = TestProductRepository;
    type OwnershipChecker = TestOwnershipChecker;

    fn config(&self) -> &Config {
        &self.config
    }

    fn customer_service(&self) -> &CustomerService<Self::CustomerRepo> {
        &self.customer_service
    }

    fn shop_service(&self) -> &ShopService<Self::ShopRepo> {
        &self.shop_service
    }

    fn product_service(&self) -> &ProductService<Self::ProductRepo, Self::OwnershipChecker> {
        &self.product_service
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    async fn check_ready(&self) -> bool {
        true
    }
}

pub fn build_test_router(state: TestAppState) -> Router {
    build_router(state)
}

// ============================================================================
// Request helpers
// ============================================================================

/// Send a request and decode the JSON body, if any.
pub async fn send<R: DeserializeOwned>(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Option<R>) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if body_bytes.is_empty() {
        return (status, None);
    }

    match serde_json::from_slice(&body_bytes) {
        Ok(data) => (status, Some(data)),
        Err(_) => (status, None),
    }
}

pub async fn get_json<R: DeserializeOwned>(app: &Router, path: &str) -> (StatusCode, Option<R>) {
    send(app, Method::GET, path, None, None).await
}

pub async fn get_json_with_auth<R: DeserializeOwned>(
    app: &Router,
    path: &str,
    token: &str,
) -> (StatusCode, Option<R>) {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_string(body).unwrap();
    send(app, Method::POST, path, None, Some(body)).await
}

pub async fn post_json_with_auth<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
    token: &str,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_string(body).unwrap();
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn put_json_with_auth<T: Serialize, R: DeserializeOwned>(
    app: &Router,
    path: &str,
    body: &T,
    token: &str,
) -> (StatusCode, Option<R>) {
    let body = serde_json::to_string(body).unwrap();
    send(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn delete_with_auth(app: &Router, path: &str, token: &str) -> StatusCode {
    let (status, _): (StatusCode, Option<serde_json::Value>) =
        send(app, Method::DELETE, path, Some(token), None).await;
    status
}
