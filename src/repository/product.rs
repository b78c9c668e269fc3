//! Product repository

use super::{classify_write_error, stale_write_error};
use crate::domain::{Product, StringUuid};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<()>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Product>>;
    async fn find_by_shop(&self, shop_id: StringUuid) -> Result<Vec<Product>>;
    /// Persist `product` if its `version` still matches the stored row.
    async fn update(&self, product: &Product) -> Result<()>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct ProductRepositoryImpl {
    pool: MySqlPool,
}

impl ProductRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SKU_TAKEN: &str = "A product with this SKU already exists in the shop";

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, shop_id, name, description, price, sku, stock_quantity, is_active, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id)
        .bind(product.shop_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.sku)
        .bind(product.stock_quantity)
        .bind(product.is_active)
        .bind(product.version)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, SKU_TAKEN))?;

        Ok(())
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, description, price, sku, stock_quantity, is_active, version, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_shop(&self, shop_id: StringUuid) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, shop_id, name, description, price, sku, stock_quantity, is_active, version, created_at, updated_at
            FROM products
            WHERE shop_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, sku = ?, stock_quantity = ?,
                is_active = ?, updated_at = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.sku)
        .bind(product.stock_quantity)
        .bind(product.is_active)
        .bind(product.updated_at)
        .bind(product.id)
        .bind(product.version)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, SKU_TAKEN))?;

        if result.rows_affected() == 0 {
            return Err(stale_write_error(&self.pool, "products", "Product", product.id).await);
        }

        Ok(())
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        Ok(())
    }
}
