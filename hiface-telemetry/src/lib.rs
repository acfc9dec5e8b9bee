//! # Hiface Telemetry
//!
//! Logging and tracing for the Hiface cloud SDK and CLI.
//!
//! - **Structured Logging**: `tracing` events rendered as JSON or pretty text
//! - **File Output**: rolling log files through `tracing-appender`
//! - **Data Masking**: secret keys, session tokens and request signatures are
//!   masked before they reach a log line
//! - **Spans**: one span per cloud API call

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Logging configuration and initialization
pub mod logging;

/// Sensitive data masking
pub mod masking;

/// Span definitions for API call tracing
pub mod spans;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{LogConfig, LogFormat, LogOutput, init_logging};
    pub use crate::masking::{Sensitive, SensitiveDataMasker};
    pub use crate::spans::*;
}
