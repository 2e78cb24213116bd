//! HTTP response type.

use std::collections::HashMap;

/// An HTTP response as seen by the client.
///
/// The body is kept as raw text; [`HttpResponse::json`] parses it on demand
/// so that callers which only look at the status (path translation misses,
/// index failures) never pay for parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The status text, e.g. `Not Found`.
    pub status_text: String,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response, deriving the status text from the code.
    ///
    /// Codes without a registered reason phrase use the numeric code as
    /// their status text, so error messages are never empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use drupal_fetch::clients::HttpResponse;
    ///
    /// let response = HttpResponse::new(404, HashMap::new(), "");
    /// assert_eq!(response.status_text, "Not Found");
    /// assert!(!response.is_ok());
    /// ```
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .map_or_else(|| code.to_string(), str::to_string);

        Self {
            code,
            status_text,
            headers,
            body: body.into(),
        }
    }

    /// Overrides the status text.
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Parses the body as JSON. An empty body parses as `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            assert!(HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 403, 404, 422, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
    }

    #[test]
    fn test_status_text_is_derived_from_code() {
        assert_eq!(HttpResponse::new(403, HashMap::new(), "").status_text, "Forbidden");
        assert_eq!(HttpResponse::new(599, HashMap::new(), "").status_text, "599");
        assert_eq!(
            HttpResponse::new(404, HashMap::new(), "")
                .with_status_text("Gone Fishing")
                .status_text,
            "Gone Fishing"
        );
    }

    #[test]
    fn test_empty_body_parses_as_null() {
        let response = HttpResponse::new(204, HashMap::new(), "  ");
        assert_eq!(response.json().unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_json_body_parsing() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"data":[]}"#);
        assert_eq!(response.json().unwrap(), json!({"data": []}));

        let broken = HttpResponse::new(200, HashMap::new(), "<html>");
        assert!(broken.json().is_err());
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123-xyz".to_string()]);

        let response = HttpResponse::new(200, headers, "");
        assert_eq!(response.request_id(), Some("abc-123-xyz"));
        assert_eq!(response.header("X-Request-Id"), Some("abc-123-xyz"));
    }
}
