//! Business logic layer

pub mod customer;
pub mod product;
pub mod shop;

pub use customer::CustomerService;
pub use product::ProductService;
pub use shop::ShopService;
