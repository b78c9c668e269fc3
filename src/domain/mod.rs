//! Domain models for the customer, shop and product services

pub mod common;
pub mod customer;
pub mod product;
pub mod shop;

pub use common::StringUuid;
pub use customer::*;
pub use product::*;
pub use shop::*;
