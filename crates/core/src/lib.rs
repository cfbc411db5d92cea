//! Core utilities for the autoparts search service
//!
//! This crate provides shared functionality used by the server and the CLI:
//!
//! - **Error handling**: Structured errors with codes, context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and environment overrides
//! - **Validation**: Fluent validation for configuration values and request parameters
//! - **Health checks**: Aggregated, serializable health reports
//!
//! # Example
//!
//! ```rust,no_run
//! use autoparts_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("serving {} on {}", config.schema.data.path, config.schema.server.bind);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod health;
pub mod validation;

pub use error::{Error, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
    pub use crate::health::{CheckResult, HealthCheck, HealthChecker, HealthReport, HealthStatus};
    pub use crate::validation::{ValidationResult, Validator};
}
