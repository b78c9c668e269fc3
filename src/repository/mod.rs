//! Data access layer (Repository pattern)

pub mod customer;
pub mod ownership;
pub mod product;
pub mod shop;

pub use customer::{CustomerRepository, CustomerRepositoryImpl};
pub use ownership::{ShopOwnershipChecker, ShopOwnershipCheckerImpl};
pub use product::{ProductRepository, ProductRepositoryImpl};
pub use shop::{ShopRepository, ShopRepositoryImpl};

use crate::domain::StringUuid;
use crate::error::AppError;
use sqlx::MySqlPool;

/// Classify a failed INSERT/UPDATE at the persistence boundary.
///
/// Unique violations become `Conflict` and foreign-key violations `BadRequest`;
/// everything else stays a database error.
pub(crate) fn classify_write_error(err: sqlx::Error, conflict_message: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict_message.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::BadRequest("Referenced record does not exist".to_string());
        }
    }
    AppError::Database(err)
}

/// Explain why a versioned UPDATE touched no rows: the row is gone, or another
/// writer got there first.
pub(crate) async fn stale_write_error(
    pool: &MySqlPool,
    table: &'static str,
    entity: &str,
    id: StringUuid,
) -> AppError {
    let query = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table);
    match sqlx::query_scalar::<_, i64>(&query)
        .bind(id)
        .fetch_one(pool)
        .await
    {
        Ok(0) => AppError::NotFound(format!("{} {} not found", entity, id)),
        Ok(_) => AppError::Conflict(format!("{} {} was modified concurrently", entity, id)),
        Err(e) => AppError::Database(e),
    }
}
