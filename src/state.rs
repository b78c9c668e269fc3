//! Application state traits for dependency injection
//!
//! Handlers are generic over `HasServices`, so the same router runs against the
//! MySQL-backed `AppState` and the in-memory state used by the HTTP tests.

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    CustomerRepository, ProductRepository, ShopOwnershipChecker, ShopRepository,
};
use crate::service::{CustomerService, ProductService, ShopService};

pub trait HasServices: Clone + Send + Sync + 'static {
    type CustomerRepo: CustomerRepository;
    type ShopRepo: ShopRepository;
    type ProductRepo: ProductRepository;
    /// Ownership lookups backing product authorization
    type OwnershipChecker: ShopOwnershipChecker;

    fn config(&self) -> &Config;

    fn customer_service(&self) -> &CustomerService<Self::CustomerRepo>;

    fn shop_service(&self) -> &ShopService<Self::ShopRepo>;

    fn product_service(&self) -> &ProductService<Self::ProductRepo, Self::OwnershipChecker>;

    fn jwt_manager(&self) -> &JwtManager;

    /// Whether the backing store answers a trivial query
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
