//! Shop API handlers

use super::{subject_id, ListResponse};
use crate::domain::{CreateShopInput, Shop, StringUuid, UpdateShopInput};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Only roles listed in the authorization config may create or change shops.
fn require_shop_manager<S: HasServices>(state: &S, auth: &AuthUser) -> Result<()> {
    if state.config().authorization.can_manage_shops(&auth.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role '{}' may not manage shops",
            auth.role
        )))
    }
}

/// Create a shop owned by the caller
#[utoipa::path(
    post,
    path = "/v1/shop",
    tag = "Shop",
    security(("bearer_jwt" = [])),
    request_body = CreateShopInput,
    responses(
        (status = 201, description = "Shop created", body = Shop),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role may not manage shops")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateShopInput>,
) -> Result<impl IntoResponse> {
    require_shop_manager(&state, &auth)?;
    let shop = state.shop_service().create(&auth.subject, input).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// List shops owned by the caller
#[utoipa::path(
    get,
    path = "/v1/shop/my",
    tag = "Shop",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Caller's shops", body = Vec<Shop>)
    )
)]
pub async fn list_mine<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let owner = subject_id(&auth)?;
    let shops = state.shop_service().list_by_owner(&owner.to_string()).await?;
    Ok(Json(ListResponse::new(shops)))
}

/// Get a shop by id
#[utoipa::path(
    get,
    path = "/v1/shop/{shop_id}",
    tag = "Shop",
    security(("bearer_jwt" = [])),
    params(("shop_id" = String, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shop", body = Shop),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Shop not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = StringUuid::parse_id(&shop_id, "shop id")?;
    let shop = state.shop_service().get(id).await?;
    Ok(Json(shop))
}

/// Update a shop the caller owns
#[utoipa::path(
    put,
    path = "/v1/shop/{shop_id}",
    tag = "Shop",
    security(("bearer_jwt" = [])),
    params(("shop_id" = String, Path, description = "Shop id")),
    request_body = UpdateShopInput,
    responses(
        (status = 200, description = "Shop updated", body = Shop),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Shop not found"),
        (status = 409, description = "Concurrent update")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(shop_id): Path<String>,
    Json(input): Json<UpdateShopInput>,
) -> Result<impl IntoResponse> {
    require_shop_manager(&state, &auth)?;
    let id = StringUuid::parse_id(&shop_id, "shop id")?;
    let shop = state.shop_service().update(id, &auth.subject, input).await?;
    Ok(Json(shop))
}

/// Delete a shop the caller owns, together with its products
#[utoipa::path(
    delete,
    path = "/v1/shop/{shop_id}",
    tag = "Shop",
    security(("bearer_jwt" = [])),
    params(("shop_id" = String, Path, description = "Shop id")),
    responses(
        (status = 204, description = "Shop deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Shop not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse> {
    require_shop_manager(&state, &auth)?;
    let id = StringUuid::parse_id(&shop_id, "shop id")?;
    state.shop_service().delete(id, &auth.subject).await?;
    Ok(StatusCode::NO_CONTENT)
}
