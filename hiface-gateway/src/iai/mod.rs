//! Face-analysis (`iai`) service.
//!
//! Used by the avatar editor to find facial landmarks before placing
//! decorations on a photo.

pub mod client;
pub mod types;

pub use client::{API_VERSION, ENDPOINT, IaiClient};
pub use types::{
    AnalyzeFaceRequest, AnalyzeFaceResponse, AnalyzeMode, DetectFaceRequest, DetectFaceResponse,
    FaceInfo, FaceShape, Point,
};
