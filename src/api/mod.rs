//! REST API handlers and shared response types

pub mod customer;
pub mod health;
pub mod metrics;
pub mod product;
pub mod shop;

use crate::domain::StringUuid;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// List response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// Message response (logout, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// The caller's customer id. A token whose subject is not an id is treated as invalid.
pub(crate) fn subject_id(auth: &AuthUser) -> Result<StringUuid> {
    StringUuid::parse_id(&auth.subject, "subject")
        .map_err(|_| AppError::Unauthorized("Token subject is not a customer id".to_string()))
}
