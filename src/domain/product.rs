//! Product domain model

use super::common::{validate_non_negative_amount, validate_not_blank, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Product entity. Authorization is derived from the owning shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    #[schema(value_type = String, format = Uuid)]
    pub id: StringUuid,
    #[schema(value_type = String, format = Uuid)]
    pub shop_id: StringUuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(shop_id: StringUuid, input: CreateProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            shop_id,
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            sku: input.sku.trim().to_string(),
            stock_quantity: input.stock_quantity,
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply only the fields present in `input` and bump `updated_at`.
    pub fn apply(&mut self, input: &UpdateProductInput) {
        if let Some(name) = &input.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &input.description {
            self.description = description.clone();
        }
        if let Some(price) = input.price {
            self.price = price;
        }
        if let Some(sku) = &input.sku {
            self.sku = sku.trim().to_string();
        }
        if let Some(stock_quantity) = input.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a product inside a shop
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub price: f64,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub sku: String,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

/// Partial product update; only present fields are changed
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub sku: Option<String>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
}
