//! Configuration management module.
//!
//! This module provides:
//! - YAML, TOML and JSON configuration file formats
//! - Validation with descriptive error messages
//! - Environment variable overrides for deployment-specific values
//!
//! # Example
//!
//! ```rust,ignore
//! use hiface_core::config::{ConfigFormat, ConfigLoader};
//!
//! let config: AppConfig = ConfigLoader::new()
//!     .with_env_prefix("HIFACE")
//!     .load_configured("hiface.yaml")?;
//! ```

mod env;
mod loader;
mod traits;

pub use env::EnvOverride;
pub use loader::{ConfigFormat, ConfigLoader};
pub use traits::{Configurable, Validatable};
