//! Customer domain model

use super::common::{validate_non_negative_amount, validate_not_blank, StringUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Role assigned when a registration does not name one
pub const DEFAULT_CUSTOMER_ROLE: &str = "CUSTOMER";

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    #[schema(value_type = String, format = Uuid)]
    pub id: StringUuid,
    /// Login key, unique across all customers
    pub phone: String,
    pub name: String,
    /// Free-form role such as OWNER, CUSTOMER or SELLER
    pub role: String,
    pub total_spent: f64,
    pub cashback_balance: f64,
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Customer {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: StringUuid::new_v4(),
            phone: String::new(),
            name: String::new(),
            role: DEFAULT_CUSTOMER_ROLE.to_string(),
            total_spent: 0.0,
            cashback_balance: 0.0,
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for registering a new customer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterCustomerInput {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default = "default_role")]
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_CUSTOMER_ROLE.to_string()
}

/// Input for phone-possession login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Input for updating a customer; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerInput {
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub role: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub total_spent: Option<f64>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub cashback_balance: Option<f64>,
    pub is_active: Option<bool>,
}

/// Self-service profile update accepted from `PUT /v1/customer/me`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileInput {
    pub phone: Option<String>,
    pub name: Option<String>,
}

impl From<UpdateProfileInput> for UpdateCustomerInput {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            phone: input.phone,
            name: input.name,
            ..Default::default()
        }
    }
}

impl Customer {
    /// Apply the provided fields of a partial update.
    pub fn apply(&mut self, input: &UpdateCustomerInput) {
        if let Some(phone) = &input.phone {
            self.phone = normalize_phone(phone);
        }
        if let Some(name) = &input.name {
            self.name = name.trim().to_string();
        }
        if let Some(role) = &input.role {
            self.role = normalize_role(role);
        }
        if let Some(total_spent) = input.total_spent {
            self.total_spent = total_spent;
        }
        if let Some(cashback_balance) = input.cashback_balance {
            self.cashback_balance = cashback_balance;
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
    }
}

/// Roles compare case-insensitively; store them upper-cased.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_uppercase()
}

/// Strip the separators people commonly type into phone numbers.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if PHONE_REGEX.is_match(&normalize_phone(phone)) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_phone"))
    }
}

lazy_static::lazy_static! {
    pub static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}
