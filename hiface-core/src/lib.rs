//! # Hiface Core
//!
//! Shared foundations for the Hiface cloud SDK and tooling.
//!
//! This crate provides:
//! - The error hierarchy surfaced by every cloud API call
//! - Configuration loading with YAML/TOML/JSON support and environment variable overrides
//! - Validation traits implemented by configuration types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Error types and handling
pub mod error;

/// Configuration management
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigFormat, ConfigLoader, Configurable, Validatable};
    pub use crate::error::{
        CloudError, ConfigError, ErrorSeverity, NetworkError, Result, ServiceError, SigningError,
    };
}
