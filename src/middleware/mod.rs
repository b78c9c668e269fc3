//! HTTP middleware: bearer authentication, error body normalization,
//! request tracing and metrics.

pub mod auth;
pub mod error_response;
pub mod metrics;
pub mod require_auth;
pub mod trace;

pub use auth::{AuthError, AuthUser};
pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use require_auth::{require_auth_middleware, AuthMiddlewareState};
pub use trace::SanitizedMakeSpan;
