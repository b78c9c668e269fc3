//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::{
    normalize_error_response, require_auth_middleware, AuthMiddlewareState, ObservabilityLayer,
    SanitizedMakeSpan,
};
use crate::repository::{
    CustomerRepositoryImpl, ProductRepositoryImpl, ShopOwnershipCheckerImpl, ShopRepositoryImpl,
};
use crate::service::{CustomerService, ProductService, ShopService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Route groups one process can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ServiceGroup {
    #[default]
    All,
    Customer,
    Shop,
    Product,
}

impl ServiceGroup {
    fn includes(self, group: ServiceGroup) -> bool {
        self == ServiceGroup::All || self == group
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub customer_service: Arc<CustomerService<CustomerRepositoryImpl>>,
    pub shop_service: Arc<ShopService<ShopRepositoryImpl>>,
    pub product_service: Arc<ProductService<ProductRepositoryImpl, ShopOwnershipCheckerImpl>>,
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// Wire repositories and services over one connection pool.
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let customer_repo = Arc::new(CustomerRepositoryImpl::new(db_pool.clone()));
        let shop_repo = Arc::new(ShopRepositoryImpl::new(db_pool.clone()));
        let product_repo = Arc::new(ProductRepositoryImpl::new(db_pool.clone()));
        let ownership = Arc::new(ShopOwnershipCheckerImpl::new(db_pool.clone()));

        let jwt_manager = JwtManager::new(config.jwt.clone());

        Self {
            config: Arc::new(config),
            db_pool,
            customer_service: Arc::new(CustomerService::new(customer_repo)),
            shop_service: Arc::new(ShopService::new(shop_repo)),
            product_service: Arc::new(ProductService::new(product_repo, ownership)),
            jwt_manager,
        }
    }
}

impl HasServices for AppState {
    type CustomerRepo = CustomerRepositoryImpl;
    type ShopRepo = ShopRepositoryImpl;
    type ProductRepo = ProductRepositoryImpl;
    type OwnershipChecker = ShopOwnershipCheckerImpl;

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
        match sqlx::query("SELECT 1").execute(&self.db_pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                false
            }
        }
    }
}

/// Run the HTTP server until it fails or the process is stopped.
pub async fn run(config: Config, group: ServiceGroup, metrics: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router_for(state, group, metrics);

    let listener = TcpListener::bind(&http_addr).await?;
    info!(service = ?group, "HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Router with every route group and no `/metrics` endpoint.
pub fn build_router<S: HasServices>(state: S) -> Router {
    build_router_for(state, ServiceGroup::All, None)
}

/// Build the router for the selected route groups.
///
/// Protected groups sit behind `require_auth_middleware`; health, registration, login
/// and the OpenAPI document are public.
pub fn build_router_for<S: HasServices>(
    state: S,
    group: ServiceGroup,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let auth_layer = middleware::from_fn_with_state(
        AuthMiddlewareState::new(state.jwt_manager().clone()),
        require_auth_middleware,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut public = Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/api-docs/openapi.json", get(crate::openapi::openapi_json));
    let mut protected = Router::new();

    if group.includes(ServiceGroup::Customer) {
        public = public
            .route("/v1/customer/register", post(api::customer::register::<S>))
            .route("/v1/customer/login", post(api::customer::login::<S>));
        protected = protected
            .route("/v1/customer/logout", post(api::customer::logout))
            .route(
                "/v1/customer/me",
                get(api::customer::me::<S>).put(api::customer::update_me::<S>),
            );
    }

    if group.includes(ServiceGroup::Shop) {
        protected = protected
            .route("/v1/shop", post(api::shop::create::<S>))
            .route("/v1/shop/my", get(api::shop::list_mine::<S>))
            .route(
                "/v1/shop/{shop_id}",
                get(api::shop::get::<S>)
                    .put(api::shop::update::<S>)
                    .delete(api::shop::delete::<S>),
            );
    }

    if group.includes(ServiceGroup::Product) {
        protected = protected
            .route(
                "/v1/shops/{shop_id}/products",
                get(api::product::list_by_shop::<S>).post(api::product::create::<S>),
            )
            .route(
                "/v1/products/{product_id}",
                get(api::product::get::<S>)
                    .put(api::product::update::<S>)
                    .delete(api::product::delete::<S>),
            );
    }

    let mut router = public.merge(protected.route_layer(auth_layer));

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(api::metrics::metrics_handler))
                .with_state(Arc::new(handle)),
        );
    }

    router
        .layer(middleware::from_fn(normalize_error_response))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(cors)
        .with_state(state)
}
