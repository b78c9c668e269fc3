//! Shop domain model

use super::common::{deserialize_some, validate_not_blank, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Shop entity. `owner_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shop {
    #[schema(value_type = String, format = Uuid)]
    pub id: StringUuid,
    #[schema(value_type = String, format = Uuid)]
    pub owner_id: StringUuid,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    pub fn new(owner_id: StringUuid, name: String, address: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            address,
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// `subject` is the token subject; anything that is not a UUID owns nothing.
    pub fn is_owned_by(&self, subject: &str) -> bool {
        subject
            .parse::<StringUuid>()
            .is_ok_and(|subject| subject == self.owner_id)
    }

    /// Apply the provided fields of a partial update and bump `updated_at`.
    pub fn apply(&mut self, input: &UpdateShopInput) {
        if let Some(name) = &input.name {
            self.name = name.trim().to_string();
        }
        if let Some(address) = &input.address {
            self.address = address.clone();
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a shop; the owner is the authenticated subject
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateShopInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 512))]
    pub address: Option<String>,
}

/// Partial shop update. `address: null` clears the address.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShopInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    pub is_active: Option<bool>,
}
