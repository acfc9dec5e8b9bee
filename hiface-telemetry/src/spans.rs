//! Span definitions for API call tracing.

use tracing::{Span, info_span};

/// Create a span covering one cloud API call, from signing to envelope parsing.
///
/// ```
/// use hiface_telemetry::spans::api_call_span;
///
/// let span = api_call_span("DescribeInstances", "cvm", Some("ap-guangzhou"));
/// let _guard = span.enter();
/// // ... sign and dispatch
/// ```
#[must_use]
pub fn api_call_span(action: &str, service: &str, region: Option<&str>) -> Span {
    info_span!(
        "cloud_api",
        action = %action,
        service = %service,
        region = region.unwrap_or("-"),
        otel.kind = "client"
    )
}

/// Create a span for a CLI command.
#[must_use]
pub fn command_span(command: &str) -> Span {
    info_span!("command", command = %command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_can_be_entered() {
        let span = api_call_span("AnalyzeFace", "iai", None);
        let _guard = span.enter();

        let span = command_span("call");
        let _guard = span.enter();
    }
}
