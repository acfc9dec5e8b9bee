//! Face-analysis service client.

use super::types::{AnalyzeFaceRequest, AnalyzeFaceResponse, DetectFaceRequest, DetectFaceResponse};
use crate::cloud::{ClientProfile, CloudClient, Credential};
use hiface_core::error::{Result, SigningError};

/// Service endpoint.
pub const ENDPOINT: &str = "iai.tencentcloudapi.com";
/// API version.
pub const API_VERSION: &str = "2020-03-03";

/// Typed client for the face-analysis service.
#[derive(Debug)]
pub struct IaiClient {
    inner: CloudClient,
}

impl IaiClient {
    /// Creates a client for `region`.
    pub fn new(credential: Credential, region: impl Into<String>, profile: ClientProfile) -> Result<Self> {
        let inner = CloudClient::new(ENDPOINT, API_VERSION, credential, Some(region.into()), profile)?;
        Ok(Self { inner })
    }

    /// Wraps a pre-configured client, e.g. one with a custom transport.
    #[must_use]
    pub fn from_client(inner: CloudClient) -> Self {
        Self { inner }
    }

    /// Underlying generic client.
    #[must_use]
    pub fn client(&self) -> &CloudClient {
        &self.inner
    }

    /// Locates facial landmarks (`AnalyzeFace`).
    pub async fn analyze_face(&self, request: &AnalyzeFaceRequest) -> Result<AnalyzeFaceResponse> {
        ensure_single_source(request.image.as_deref(), request.url.as_deref())?;
        self.inner.request_as("AnalyzeFace", request).await
    }

    /// Detects face bounding boxes (`DetectFace`).
    pub async fn detect_face(&self, request: &DetectFaceRequest) -> Result<DetectFaceResponse> {
        ensure_single_source(request.image.as_deref(), request.url.as_deref())?;
        self.inner.request_as("DetectFace", request).await
    }
}

fn ensure_single_source(image: Option<&str>, url: Option<&str>) -> std::result::Result<(), SigningError> {
    let reason = match (image, url) {
        (None, None) => "one of Image or Url is required",
        (Some(_), Some(_)) => "Image and Url are mutually exclusive",
        _ => return Ok(()),
    };
    Err(SigningError::InvalidParameter {
        name: "Image".to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{
        FixedClock, FixedNonce, HttpRequest, HttpResponse, HttpTransport, RequestBody,
        SignatureMethod,
    };
    use async_trait::async_trait;
    use hiface_core::error::{CloudError, NetworkError};
    use std::sync::{Arc, Mutex};

    struct Recorder {
        body: String,
        sent: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl HttpTransport for Recorder {
        async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, NetworkError> {
            self.sent.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                body: self.body.clone(),
            })
        }
    }

    fn iai(body: &str) -> (IaiClient, Arc<Recorder>) {
        let recorder = Arc::new(Recorder {
            body: body.to_string(),
            sent: Mutex::new(Vec::new()),
        });
        let profile = ClientProfile::builder()
            .sign_method(SignatureMethod::Tc3HmacSha256)
            .build();
        let client = IaiClient::new(Credential::new("AKIDtest", "secret"), "ap-shanghai", profile)
            .unwrap();
        let inner = client
            .inner
            .with_transport(recorder.clone())
            .with_clock(Arc::new(FixedClock::from_unix_seconds(1_551_113_065)))
            .with_nonce_source(Arc::new(FixedNonce(1)));
        (IaiClient::from_client(inner), recorder)
    }

    #[tokio::test]
    async fn test_analyze_face() {
        let body = r#"{"Response": {
            "ImageWidth": 512, "ImageHeight": 512,
            "FaceShapeSet": [{"FaceProfile": [{"X": 10, "Y": 20}], "Nose": [{"X": 30, "Y": 40}]}],
            "FaceModelVersion": "3.0", "RequestId": "req-face"}}"#;
        let (client, recorder) = iai(body);

        let response = client
            .analyze_face(&AnalyzeFaceRequest::from_url("https://example.com/a.jpg"))
            .await
            .unwrap();
        assert_eq!(response.image_width, 512);
        assert_eq!(response.face_shape_set[0].nose[0].y, 40);
        assert_eq!(response.request_id, "req-face");

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent[0].url, "https://iai.tencentcloudapi.com/");
        assert_eq!(
            sent[0].body,
            RequestBody::Json(r#"{"Url":"https://example.com/a.jpg"}"#.to_string())
        );
        assert!(sent[0].headers.iter().any(|(k, v)| k == "X-TC-Action" && v == "AnalyzeFace"));
        assert!(sent[0].headers.iter().any(|(k, v)| k == "X-TC-Version" && v == API_VERSION));
        let authorization = &sent[0]
            .headers
            .iter()
            .find(|(k, _)| k == "Authorization")
            .unwrap()
            .1;
        assert!(authorization.contains("/2019-02-25/iai/tc3_request"));
    }

    #[tokio::test]
    async fn test_detect_face() {
        let body = r#"{"Response": {"ImageWidth": 100, "ImageHeight": 80,
            "FaceInfos": [{"X": 1, "Y": 2, "Width": 30, "Height": 40}], "RequestId": "r"}}"#;
        let (client, _) = iai(body);

        let request = DetectFaceRequest {
            image: Some("aGVsbG8=".to_string()),
            max_face_num: Some(1),
            ..DetectFaceRequest::default()
        };
        let response = client.detect_face(&request).await.unwrap();
        assert_eq!(response.face_infos.len(), 1);
        assert_eq!(response.face_infos[0].width, 30);
    }

    #[tokio::test]
    async fn test_missing_image_source_is_rejected_before_sending() {
        let (client, recorder) = iai("{}");
        let err = client
            .analyze_face(&AnalyzeFaceRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CloudError::Signing(SigningError::InvalidParameter { .. })
        ));
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_both_image_sources_are_rejected_before_sending() {
        let (client, recorder) = iai("{}");
        let request = DetectFaceRequest {
            image: Some("aGVsbG8=".to_string()),
            url: Some("https://example.com/a.jpg".to_string()),
            ..DetectFaceRequest::default()
        };
        let err = client.detect_face(&request).await.unwrap_err();
        let CloudError::Signing(SigningError::InvalidParameter { reason, .. }) = err else {
            panic!("expected invalid parameter, got {err:?}");
        };
        assert!(reason.contains("mutually exclusive"));
        assert!(recorder.sent.lock().unwrap().is_empty());

        let request = AnalyzeFaceRequest {
            image: Some("aGVsbG8=".to_string()),
            url: Some("https://example.com/a.jpg".to_string()),
            ..AnalyzeFaceRequest::default()
        };
        assert!(client.analyze_face(&request).await.is_err());
        assert!(recorder.sent.lock().unwrap().is_empty());
    }
}
