//! # dm-common
//!
//! Shared utilities: configuration, application errors, JWT identity
//! resolution, and tracing setup.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use auth::{Claims, JwtService};
pub use config::{AppConfig, ConfigError, CorsConfig, Environment, RateLimitConfig, ServerConfig};
pub use error::AppError;
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
