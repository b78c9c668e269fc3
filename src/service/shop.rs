//! Shop business logic

use crate::domain::{CreateShopInput, Shop, StringUuid, UpdateShopInput};
use crate::error::{AppError, Result};
use crate::repository::ShopRepository;
use std::sync::Arc;
use validator::Validate;

pub struct ShopService<R: ShopRepository> {
    repo: Arc<R>,
}

impl<R: ShopRepository> ShopService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create an active shop owned by `owner_id`.
    pub async fn create(&self, owner_id: &str, input: CreateShopInput) -> Result<Shop> {
        let owner_id = StringUuid::parse_id(owner_id, "owner id")?;
        input.validate()?;

        let shop = Shop::new(owner_id, input.name, input.address);
        self.repo.create(&shop).await?;

        tracing::info!(shop_id = %shop.id, owner_id = %owner_id, "Shop created");
        Ok(shop)
    }

    pub async fn get(&self, id: StringUuid) -> Result<Shop> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shop {} not found", id)))
    }

    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Shop>> {
        let owner_id = StringUuid::parse_id(owner_id, "owner id")?;
        self.repo.find_by_owner(owner_id).await
    }

    /// Load, check ownership, validate, then persist with a version check.
    pub async fn update(
        &self,
        id: StringUuid,
        requester: &str,
        input: UpdateShopInput,
    ) -> Result<Shop> {
        let mut shop = self.get_owned(id, requester).await?;
        input.validate()?;

        shop.apply(&input);
        self.repo.update(&shop).await?;
        shop.version += 1;
        Ok(shop)
    }

    pub async fn delete(&self, id: StringUuid, requester: &str) -> Result<()> {
        self.get_owned(id, requester).await?;
        self.repo.delete(id).await?;
        tracing::info!(shop_id = %id, "Shop deleted");
        Ok(())
    }

    async fn get_owned(&self, id: StringUuid, requester: &str) -> Result<Shop> {
        let shop = self.get(id).await?;
        if !shop.is_owned_by(requester) {
            return Err(AppError::Forbidden(
                "Only the shop owner can modify this shop".to_string(),
            ));
        }
        Ok(shop)
    }
}
