//! Request and response types for the face-analysis service.

use serde::{Deserialize, Serialize};

/// Landmark detection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AnalyzeMode {
    /// Every face in the image.
    #[default]
    AllFaces,
    /// Only the largest face.
    LargestFace,
}

impl From<AnalyzeMode> for u8 {
    fn from(mode: AnalyzeMode) -> Self {
        match mode {
            AnalyzeMode::AllFaces => 0,
            AnalyzeMode::LargestFace => 1,
        }
    }
}

impl TryFrom<u8> for AnalyzeMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::AllFaces),
            1 => Ok(Self::LargestFace),
            other => Err(format!("unknown analyze mode {other}")),
        }
    }
}

/// `AnalyzeFace` request. Exactly one of `image` or `url` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyzeFaceRequest {
    /// Detection mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AnalyzeMode>,
    /// Base64-encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Algorithm model version, e.g. `3.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_model_version: Option<String>,
}

impl AnalyzeFaceRequest {
    /// Analyzes an inline base64 image.
    #[must_use]
    pub fn from_image(image_base64: impl Into<String>) -> Self {
        Self {
            image: Some(image_base64.into()),
            ..Self::default()
        }
    }

    /// Analyzes an image fetched by the service.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Sets the detection mode.
    #[must_use]
    pub fn with_mode(mut self, mode: AnalyzeMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    #[serde(rename = "X")]
    pub x: i64,
    /// Vertical offset from the top edge.
    #[serde(rename = "Y")]
    pub y: i64,
}

/// Facial landmark outlines for one face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FaceShape {
    /// Jaw and cheek outline.
    pub face_profile: Vec<Point>,
    /// Left eye outline.
    pub left_eye: Vec<Point>,
    /// Right eye outline.
    pub right_eye: Vec<Point>,
    /// Left eyebrow outline.
    pub left_eye_brow: Vec<Point>,
    /// Right eyebrow outline.
    pub right_eye_brow: Vec<Point>,
    /// Mouth outline.
    pub mouth: Vec<Point>,
    /// Nose outline.
    pub nose: Vec<Point>,
    /// Left pupil center.
    pub left_pupil: Vec<Point>,
    /// Right pupil center.
    pub right_pupil: Vec<Point>,
}

impl FaceShape {
    /// Axis-aligned bounds of the face outline as `(top_left, bottom_right)`.
    #[must_use]
    pub fn profile_bounds(&self) -> Option<(Point, Point)> {
        let first = self.face_profile.first()?;
        let init = (*first, *first);
        Some(self.face_profile.iter().fold(init, |(min, max), p| {
            (
                Point {
                    x: min.x.min(p.x),
                    y: min.y.min(p.y),
                },
                Point {
                    x: max.x.max(p.x),
                    y: max.y.max(p.y),
                },
            )
        }))
    }
}

/// `AnalyzeFace` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AnalyzeFaceResponse {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// One entry per detected face.
    pub face_shape_set: Vec<FaceShape>,
    /// Model version that produced the result.
    pub face_model_version: String,
    /// Request-correlation identifier.
    pub request_id: String,
}

/// `DetectFace` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectFaceRequest {
    /// Maximum number of faces to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_face_num: Option<u32>,
    /// Base64-encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Algorithm model version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_model_version: Option<String>,
}

/// Bounding box of one detected face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FaceInfo {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Box width.
    pub width: i64,
    /// Box height.
    pub height: i64,
}

/// `DetectFace` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetectFaceResponse {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Detected faces.
    pub face_infos: Vec<FaceInfo>,
    /// Model version that produced the result.
    pub face_model_version: String,
    /// Request-correlation identifier.
    pub request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_unset_fields() {
        let request = AnalyzeFaceRequest::from_url("https://example.com/me.jpg")
            .with_mode(AnalyzeMode::LargestFace);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"Mode": 1, "Url": "https://example.com/me.jpg"})
        );
    }

    #[test]
    fn test_response_decodes_landmarks() {
        let response: AnalyzeFaceResponse = serde_json::from_value(json!({
            "ImageWidth": 640,
            "ImageHeight": 480,
            "FaceShapeSet": [{
                "FaceProfile": [{"X": 100, "Y": 120}, {"X": 180, "Y": 260}, {"X": 260, "Y": 118}],
                "LeftEye": [{"X": 140, "Y": 160}],
                "Mouth": [{"X": 180, "Y": 220}]
            }],
            "FaceModelVersion": "3.0",
            "RequestId": "req-1"
        }))
        .unwrap();

        assert_eq!(response.image_width, 640);
        let face = &response.face_shape_set[0];
        assert!(face.nose.is_empty());
        assert_eq!(
            face.profile_bounds(),
            Some((Point { x: 100, y: 118 }, Point { x: 260, y: 260 }))
        );
    }

    #[test]
    fn test_mode_rejects_unknown_value() {
        assert!(serde_json::from_value::<AnalyzeMode>(json!(7)).is_err());
        assert_eq!(FaceShape::default().profile_bounds(), None);
    }
}
