//! Shop repository

use super::{classify_write_error, stale_write_error};
use crate::domain::{Shop, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn create(&self, shop: &Shop) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Shop>>;
    async fn find_by_owner(&self, owner_id: StringUuid) -> Result<Vec<Shop>>;
    /// Persist `shop` if its `version` still matches the stored row.
    async fn update(&self, shop: &Shop) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct ShopRepositoryImpl {
    pool: MySqlPool,
}

impl ShopRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for ShopRepositoryImpl {
    async fn create(&self, shop: &Shop) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shops (id, owner_id, name, address, is_active, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(shop.id)
        .bind(shop.owner_id)
        .bind(&shop.name)
        .bind(&shop.address)
        .bind(shop.is_active)
        .bind(shop.version)
        .bind(shop.created_at)
        .bind(shop.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, "Shop already exists"))?;

        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Shop>> {
        let shop = sqlx::query_as::<_, Shop>(
            r#"
            SELECT id, owner_id, name, address, is_active, version, created_at, updated_at
            FROM shops
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shop)
    }

    async fn find_by_owner(&self, owner_id: StringUuid) -> Result<Vec<Shop>> {
        let shops = sqlx::query_as::<_, Shop>(
            r#"
            SELECT id, owner_id, name, address, is_active, version, created_at, updated_at
            FROM shops
            WHERE owner_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shops)
    }

    async fn update(&self, shop: &Shop) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE shops
            SET name = ?, address = ?, is_active = ?, updated_at = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&shop.name)
        .bind(&shop.address)
        .bind(shop.is_active)
        .bind(shop.updated_at)
        .bind(shop.id)
        .bind(shop.version)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, "Shop already exists"))?;

        if result.rows_affected() == 0 {
            return Err(stale_write_error(&self.pool, "shops", "Shop", shop.id).await);
        }

        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM shops WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Shop {} not found", id)));
        }

        Ok(())
    }
}
