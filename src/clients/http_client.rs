//! HTTP transport for Drupal communication.
//!
//! [`Transport`] is the seam between the resource client and the network:
//! [`HttpClient`] implements it on top of `reqwest`, and tests substitute
//! in-process doubles.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::DrupalConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media type of JSON:API documents.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Sends a single `GET` request and returns the raw response.
///
/// Implementations must return non-2xx responses as `Ok`; classifying them is
/// the caller's job. Only failures to obtain a response at all (connection
/// errors, elapsed deadlines) are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] or [`HttpError::Timeout`] when no
    /// response could be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// HTTP client for making requests to a Drupal site.
///
/// The client handles:
/// - Default headers including `User-Agent` and the JSON:API `Accept` type
/// - Per-request header overrides and cache hints
/// - Per-request deadlines
///
/// There is no retry logic; every call is attempted exactly once.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_fetch::DrupalConfig;
/// use drupal_fetch::clients::{HttpClient, HttpRequest, Transport};
///
/// let config = DrupalConfig::from_base_url("https://cms.example.com")?;
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder("https://cms.example.com/jsonapi".parse()?).build();
/// let response = client.send(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &DrupalConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}drupal-fetch v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), JSON_API_MEDIA_TYPE.to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a `GET` request.
    ///
    /// Request headers override the defaults. When the request carries a
    /// deadline, the exchange (including reading the body) is abandoned once
    /// it elapses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures and
    /// [`HttpError::Timeout`] when the deadline elapses. Non-2xx responses
    /// are returned as `Ok`.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        // `HeaderMap::insert` replaces by name case-insensitively.
        let mut headers = HeaderMap::new();
        for (key, value) in self.default_headers.iter().chain(&request.effective_headers()) {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Skipping invalid request header '{key}'"),
            }
        }

        let req_builder = self.client.get(request.url.clone()).headers(headers);

        let exchange = async {
            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body = res.text().await?;
            Ok::<_, HttpError>(HttpResponse::new(code, res_headers, body))
        };

        let response = match request.timeout {
            Some(after) => tokio::time::timeout(after, exchange)
                .await
                .map_err(|_| HttpError::Timeout { after })?,
            None => exchange.await,
        }?;

        tracing::trace!("GET {} -> {}", request.url, response.code);
        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DrupalConfig {
        DrupalConfig::from_base_url("https://cms.example.com").unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("drupal-fetch v"));
        assert!(user_agent.contains("| Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = DrupalConfig::builder()
            .base_url(crate::BaseUrl::new("https://cms.example.com").unwrap())
            .user_agent_prefix("MySite/2.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MySite/2.0 | drupal-fetch v"));
    }

    #[test]
    fn test_accept_header_is_json_api() {
        let client = HttpClient::new(&config());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/vnd.api+json".to_string())
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
