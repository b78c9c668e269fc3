//! Product API handlers. Mutations are gated on ownership of the product's shop.

use super::ListResponse;
use crate::domain::{CreateProductInput, Product, StringUuid, UpdateProductInput};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Create a product in a shop the caller owns
#[utoipa::path(
    post,
    path = "/v1/shops/{shop_id}/products",
    tag = "Product",
    security(("bearer_jwt" = [])),
    params(("shop_id" = String, Path, description = "Shop id")),
    request_body = CreateProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the shop owner"),
        (status = 409, description = "SKU already used in this shop"),
        (status = 503, description = "Ownership could not be verified")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(shop_id): Path<String>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse> {
    let product = state
        .product_service()
        .create(&shop_id, &auth.subject, input)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products of a shop
#[utoipa::path(
    get,
    path = "/v1/shops/{shop_id}/products",
    tag = "Product",
    security(("bearer_jwt" = [])),
    params(("shop_id" = String, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Products of the shop", body = Vec<Product>),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn list_by_shop<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse> {
    let products = state.product_service().list_by_shop(&shop_id).await?;
    Ok(Json(ListResponse::new(products)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/v1/products/{product_id}",
    tag = "Product",
    security(("bearer_jwt" = [])),
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = StringUuid::parse_id(&product_id, "product id")?;
    let product = state.product_service().get(id).await?;
    Ok(Json(product))
}

/// Update a product; only fields present in the body change
#[utoipa::path(
    put,
    path = "/v1/products/{product_id}",
    tag = "Product",
    security(("bearer_jwt" = [])),
    params(("product_id" = String, Path, description = "Product id")),
    request_body = UpdateProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the shop owner"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Concurrent update or SKU taken"),
        (status = 503, description = "Ownership could not be verified")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(product_id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse> {
    let id = StringUuid::parse_id(&product_id, "product id")?;
    let product = state
        .product_service()
        .update(id, &auth.subject, input)
        .await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/v1/products/{product_id}",
    tag = "Product",
    security(("bearer_jwt" = [])),
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Not the shop owner"),
        (status = 404, description = "Product not found"),
        (status = 503, description = "Ownership could not be verified")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = StringUuid::parse_id(&product_id, "product id")?;
    state.product_service().delete(id, &auth.subject).await?;
    Ok(StatusCode::NO_CONTENT)
}
