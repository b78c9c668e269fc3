//! Product business logic
//!
//! Every mutation walks the same path: look up, check shop ownership, validate,
//! persist. A failed ownership lookup is `AuthzUnavailable`, never "not the owner".

use crate::domain::{CreateProductInput, Product, StringUuid, UpdateProductInput};
use crate::error::{AppError, Result};
use crate::repository::{ProductRepository, ShopOwnershipChecker};
use metrics::counter;
use std::sync::Arc;
use validator::Validate;

pub struct ProductService<R: ProductRepository, C: ShopOwnershipChecker> {
    repo: Arc<R>,
    ownership: Arc<C>,
}

impl<R: ProductRepository, C: ShopOwnershipChecker> ProductService<R, C> {
    pub fn new(repo: Arc<R>, ownership: Arc<C>) -> Self {
        Self { repo, ownership }
    }

    pub async fn create(
        &self,
        shop_id: &str,
        requester: &str,
        input: CreateProductInput,
    ) -> Result<Product> {
        let shop_id = StringUuid::parse_id(shop_id, "shop id")?;
        self.authorize(requester, shop_id).await?;
        input.validate()?;

        let product = Product::new(shop_id, input);
        self.repo.create(&product).await?;

        tracing::info!(product_id = %product.id, shop_id = %shop_id, "Product created");
        Ok(product)
    }

    pub async fn get(&self, id: StringUuid) -> Result<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn list_by_shop(&self, shop_id: &str) -> Result<Vec<Product>> {
        let shop_id = StringUuid::parse_id(shop_id, "shop id")?;
        self.repo.find_by_shop(shop_id).await
    }

    /// Partial update: only fields present in `input` change.
    pub async fn update(
        &self,
        id: StringUuid,
        requester: &str,
        input: UpdateProductInput,
    ) -> Result<Product> {
        let mut product = self.get(id).await?;
        self.authorize(requester, product.shop_id).await?;
        input.validate()?;

        product.apply(&input);
        self.repo.update(&product).await?;
        product.version += 1;
        Ok(product)
    }

    pub async fn delete(&self, id: StringUuid, requester: &str) -> Result<()> {
        let product = self.get(id).await?;
        self.authorize(requester, product.shop_id).await?;

        self.repo.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn authorize(&self, requester: &str, shop_id: StringUuid) -> Result<()> {
        match self.ownership.is_owner(requester, shop_id).await {
            Ok(true) => {
                counter!("miniature_ownership_checks_total", "result" => "owner").increment(1);
                Ok(())
            }
            Ok(false) => {
                counter!("miniature_ownership_checks_total", "result" => "not_owner").increment(1);
                Err(AppError::Forbidden(
                    "Only the shop owner can manage its products".to_string(),
                ))
            }
            Err(e) => {
                counter!("miniature_ownership_checks_total", "result" => "error").increment(1);
                tracing::error!(shop_id = %shop_id, error = %e, "Shop ownership check failed");
                Err(AppError::AuthzUnavailable(format!(
                    "Could not verify ownership of shop {}",
                    shop_id
                )))
            }
        }
    }
}
