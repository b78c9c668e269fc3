//! Customer API handlers: registration, login and the caller's own profile

use super::{subject_id, MessageResponse, TokenResponse};
use crate::domain::{
    Customer, LoginInput, RegisterCustomerInput, UpdateCustomerInput, UpdateProfileInput,
};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

/// Register a customer
#[utoipa::path(
    post,
    path = "/v1/customer/register",
    tag = "Customer",
    request_body = RegisterCustomerInput,
    responses(
        (status = 201, description = "Customer registered", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Phone already registered")
    )
)]
pub async fn register<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<RegisterCustomerInput>,
) -> Result<impl IntoResponse> {
    let customer = state.customer_service().register(input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Exchange a registered phone number for an access token
#[utoipa::path(
    post,
    path = "/v1/customer/login",
    tag = "Customer",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unknown phone"),
        (status = 403, description = "Customer inactive")
    )
)]
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    input.validate()?;

    let customer = match state.customer_service().authenticate(&input.phone).await {
        Ok(customer) => customer,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Unauthorized(
                "Invalid login credentials".to_string(),
            ))
        }
        Err(e) => return Err(e),
    };

    let jwt = state.jwt_manager();
    let token = jwt.issue(&customer.id.to_string(), &customer.role)?;
    tracing::info!(customer_id = %customer.id, "Customer logged in");

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: jwt.token_ttl_secs(),
    }))
}

/// Acknowledge a logout. Tokens are stateless and stay valid until they expire.
#[utoipa::path(
    post,
    path = "/v1/customer/logout",
    tag = "Customer",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn logout(auth: AuthUser) -> Result<impl IntoResponse> {
    tracing::info!(subject = %auth.subject, "Customer logged out");
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Get the calling customer's profile
#[utoipa::path(
    get,
    path = "/v1/customer/me",
    tag = "Customer",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = Customer),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Customer no longer exists")
    )
)]
pub async fn me<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    let id = subject_id(&auth)?;
    let customer = state.customer_service().get(id).await?;
    Ok(Json(customer))
}

/// Update the calling customer's phone or name
#[utoipa::path(
    put,
    path = "/v1/customer/me",
    tag = "Customer",
    security(("bearer_jwt" = [])),
    request_body = UpdateProfileInput,
    responses(
        (status = 200, description = "Profile updated", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Phone taken or concurrent update")
    )
)]
pub async fn update_me<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileInput>,
) -> Result<impl IntoResponse> {
    let id = subject_id(&auth)?;
    let customer = state
        .customer_service()
        .update(id, UpdateCustomerInput::from(input))
        .await?;
    Ok(Json(customer))
}
