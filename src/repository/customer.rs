//! Customer repository

use super::{classify_write_error, stale_write_error};
use crate::domain::{Customer, StringUuid};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Customer>>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>>;
    /// Persist `customer` if its `version` still matches the stored row.
    async fn update(&self, customer: &Customer) -> Result<()>;
}

pub struct CustomerRepositoryImpl {
    pool: MySqlPool,
}

impl CustomerRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const PHONE_TAKEN: &str = "Phone number is already registered";

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    async fn create(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers
                (id, phone, name, role, total_spent, cashback_balance, is_active, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.phone)
        .bind(&customer.name)
        .bind(&customer.role)
        .bind(customer.total_spent)
        .bind(customer.cashback_balance)
        .bind(customer.is_active)
        .bind(customer.version)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, PHONE_TAKEN))?;

        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, phone, name, role, total_spent, cashback_balance, is_active, version, created_at, updated_at
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, phone, name, role, total_spent, cashback_balance, is_active, version, created_at, updated_at
            FROM customers
            WHERE phone = ?
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET phone = ?, name = ?, role = ?, total_spent = ?, cashback_balance = ?,
                is_active = ?, updated_at = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&customer.phone)
        .bind(&customer.name)
        .bind(&customer.role)
        .bind(customer.total_spent)
        .bind(customer.cashback_balance)
        .bind(customer.is_active)
        .bind(customer.updated_at)
        .bind(customer.id)
        .bind(customer.version)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, PHONE_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(stale_write_error(&self.pool, "customers", "Customer", customer.id).await);
        }

        Ok(())
    }
}
