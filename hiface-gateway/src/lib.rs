//! # Hiface Gateway
//!
//! Signing and dispatch client for the cloud vendor's REST API.
//!
//! This crate provides:
//! - Parameter flattening for legacy-signed requests
//! - Legacy (HmacSHA1/HmacSHA256) and TC3-HMAC-SHA256 request signing
//! - A single-attempt HTTP dispatcher with `Response` envelope parsing
//! - A typed client for the face-analysis service
//!
//! # Architecture
//!
//! - `cloud` - generic client, signers, transport
//! - `iai` - face-analysis service built on `cloud`
//!
//! # Example
//!
//! ```ignore
//! use hiface_gateway::cloud::{ClientProfile, Credential, SignatureMethod};
//! use hiface_gateway::iai::{AnalyzeFaceRequest, IaiClient};
//!
//! let profile = ClientProfile::builder()
//!     .sign_method(SignatureMethod::Tc3HmacSha256)
//!     .build();
//! let client = IaiClient::new(Credential::from_env()?, "ap-shanghai", profile)?;
//! let faces = client
//!     .analyze_face(&AnalyzeFaceRequest::from_url("https://example.com/me.jpg"))
//!     .await?;
//! ```

#![warn(missing_docs)]
#![allow(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::cargo)]
#![allow(clippy::nursery)]

/// Generic cloud API client infrastructure
pub mod cloud;

/// Face-analysis service
pub mod iai;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cloud::{
        ClientProfile, CloudClient, Credential, HttpMethod, HttpTransport, SignatureMethod,
        flatten,
    };
    pub use crate::iai::IaiClient;
}
