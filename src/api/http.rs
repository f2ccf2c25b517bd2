//! HTTP utilities for CloudHaven REST API calls

use super::error::ApiError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control() && c != ' ', "")
}

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Human-readable failure message: the body's `message` field when the
    /// backend sent one, else the status line.
    pub fn error_message(&self) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                format!(
                    "Error: {} {}",
                    self.status.as_u16(),
                    self.status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_string()
            })
    }
}

/// HTTP client wrapper for CloudHaven API calls
#[derive(Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("cloudhaven/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientInit)?;

        Ok(Self { client })
    }

    /// Send a request and read the whole body.
    ///
    /// Only transport failures are errors here; non-2xx statuses come back as
    /// a [`RawResponse`] for the caller to classify.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<RawResponse, reqwest::Error> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).headers(headers.clone());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let response = raw(400, r#"{"message": "Bucket name already taken"}"#);
        assert_eq!(response.error_message(), "Bucket name already taken");
    }

    #[test]
    fn test_error_message_falls_back_to_status_line() {
        assert_eq!(raw(404, "").error_message(), "Error: 404 Not Found");
        assert_eq!(
            raw(500, "<html>oops</html>").error_message(),
            "Error: 500 Internal Server Error"
        );
        assert_eq!(
            raw(422, r#"{"message": ""}"#).error_message(),
            "Error: 422 Unprocessable Entity"
        );
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(raw(204, "").json().unwrap(), Value::Null);
        assert_eq!(raw(200, "  \n").json().unwrap(), Value::Null);
        assert!(raw(200, "not json").json().is_err());
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "a".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"a".repeat(200)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("line1\nline2\r"), "line1line2");
    }
}
