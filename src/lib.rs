//! Miniature - customer, shop and product services
//!
//! Customers register and log in by phone number and receive a bearer token.
//! Sellers manage their own shops, and products can only be changed by the
//! owner of the shop they belong to.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
