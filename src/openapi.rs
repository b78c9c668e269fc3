//! OpenAPI 3.0 documentation assembly
//!
//! Collects the handler path annotations and domain schemas into one document,
//! served as JSON at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Miniature API",
        version = "0.1.0",
        description = "Customer, shop and product services with ownership-checked mutations"
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Customer", description = "Registration, login and the caller's profile"),
        (name = "Shop", description = "Shops owned by sellers"),
        (name = "Product", description = "Products listed in a shop"),
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::TokenResponse,
            crate::api::health::HealthResponse,
            crate::domain::Customer,
            crate::domain::RegisterCustomerInput,
            crate::domain::LoginInput,
            crate::domain::UpdateProfileInput,
            crate::domain::Shop,
            crate::domain::CreateShopInput,
            crate::domain::UpdateShopInput,
            crate::domain::Product,
            crate::domain::CreateProductInput,
            crate::domain::UpdateProductInput,
        )
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,

        crate::api::customer::register,
        crate::api::customer::login,
        crate::api::customer::logout,
        crate::api::customer::me,
        crate::api::customer::update_me,

        crate::api::shop::create,
        crate::api::shop::list_mine,
        crate::api::shop::get,
        crate::api::shop::update,
        crate::api::shop::delete,

        crate::api::product::create,
        crate::api::product::list_by_shop,
        crate::api::product::get,
        crate::api::product::update,
        crate::api::product::delete,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// The generated document plus the bearer token security scheme.
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
        doc
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::build())
}
