//! Authenticated API access

mod client;
mod config;
mod errors;
mod request;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError, DEFAULT_TIMEOUT, SubService, UnauthorizedPolicy};
pub use errors::{ApiError, ApiErrorKind, BODY_EXCERPT_CHARS};
pub use request::{AuthenticatedRequest, Method};
