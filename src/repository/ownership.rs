//! Shop ownership lookups used to authorize product mutations

use crate::domain::StringUuid;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopOwnershipChecker: Send + Sync {
    /// `Ok(false)` when the shop does not exist; lookup failures are `Err`.
    async fn is_owner(&self, subject: &str, shop_id: StringUuid) -> Result<bool>;
}

pub struct ShopOwnershipCheckerImpl {
    pool: MySqlPool,
}

impl ShopOwnershipCheckerImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopOwnershipChecker for ShopOwnershipCheckerImpl {
    async fn is_owner(&self, subject: &str, shop_id: StringUuid) -> Result<bool> {
        let owner_id: Option<StringUuid> =
            sqlx::query_scalar("SELECT owner_id FROM shops WHERE id = ?")
                .bind(shop_id)
                .fetch_optional(&self.pool)
                .await?;

        let subject = match subject.parse::<StringUuid>() {
            Ok(subject) => subject,
            Err(_) => return Ok(false),
        };
        Ok(owner_id == Some(subject))
    }
}
