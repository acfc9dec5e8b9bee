//! Response envelope parsing.
//!
//! Every vendor answer has the shape `{"Response": {...}}`. A failed call
//! carries `Response.Error.{Code, Message}` and, like a successful one,
//! `Response.RequestId`.

use hiface_core::error::{CloudError, NetworkError, Result, ServiceError};
use serde::Deserialize;
use serde_json::Value;

/// Longest body excerpt copied into an error message.
const MAX_EXCERPT_CHARS: usize = 256;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Turns one HTTP answer into the `Response` payload or a single error.
///
/// A status other than 200 is an HTTP error regardless of the body.
///
/// ```
/// use hiface_gateway::cloud::parse_envelope;
///
/// let body = r#"{"Response": {"TotalCount": 0, "RequestId": "r-1"}}"#;
/// let response = parse_envelope(200, body).unwrap();
/// assert_eq!(response["TotalCount"], 0);
/// ```
pub fn parse_envelope(status: u16, body: &str) -> Result<Value> {
    if status != 200 {
        return Err(NetworkError::Http {
            status_code: status,
            reason: excerpt(body),
        }
        .into());
    }

    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| invalid_response(format!("{e}: {}", excerpt(body))))?;
    let response = envelope.response;
    if !response.is_object() {
        return Err(invalid_response("`Response` is not an object".to_string()));
    }

    // `"Error": null` counts as success.
    if let Some(error) = response.get("Error").filter(|e| !e.is_null()) {
        let error = ErrorBody::deserialize(error)
            .map_err(|e| invalid_response(format!("malformed `Response.Error`: {e}")))?;
        let request_id = response
            .get("RequestId")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(ServiceError::new(error.code, error.message, request_id).into());
    }

    Ok(response)
}

fn invalid_response(reason: String) -> CloudError {
    NetworkError::InvalidResponse { reason }.into()
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty body".to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_EXCERPT_CHARS).collect();
    if trimmed.chars().nth(MAX_EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
