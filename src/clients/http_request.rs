//! HTTP request types.
//!
//! Every call the client makes is a `GET` against an absolute URL, so a
//! request is just the URL plus per-call headers, cache hint and deadline.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

/// Cache hint forwarded to the server as a `Cache-Control` request header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// No hint; the transport decides.
    #[default]
    Default,
    /// Do not store the response anywhere (`no-store`).
    NoStore,
    /// Revalidate with the origin (`no-cache`).
    NoCache,
    /// Bypass any cache and fetch a fresh copy (`no-cache`).
    Reload,
    /// Accept a stale cached copy (`max-stale`).
    ForceCache,
    /// Only answer from cache (`only-if-cached`).
    OnlyIfCached,
}

impl CacheMode {
    /// Returns the `Cache-Control` value for this mode, if any.
    #[must_use]
    pub const fn as_cache_control(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::NoStore => Some("no-store"),
            Self::NoCache | Self::Reload => Some("no-cache"),
            Self::ForceCache => Some("max-stale"),
            Self::OnlyIfCached => Some("only-if-cached"),
        }
    }
}

/// A `GET` request to be sent through a [`Transport`](crate::clients::Transport).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use drupal_fetch::clients::HttpRequest;
///
/// let request = HttpRequest::builder("https://cms.example.com/jsonapi".parse().unwrap())
///     .header("Accept-Language", "fr")
///     .timeout(Some(Duration::from_secs(5)))
///     .build();
///
/// assert_eq!(request.url.path(), "/jsonapi");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The absolute request URL, including its query string.
    pub url: Url,
    /// Extra headers; these override the transport's defaults.
    pub headers: HashMap<String, String>,
    /// Deadline for the whole exchange.
    pub timeout: Option<Duration>,
    /// Cache hint.
    pub cache: Option<CacheMode>,
}

impl HttpRequest {
    /// Creates a new builder for a request to `url`.
    #[must_use]
    pub fn builder(url: Url) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url)
    }

    /// Returns the request headers with the cache hint folded in.
    ///
    /// A caller-supplied `Cache-Control` header, in any letter case, wins
    /// over the hint.
    #[must_use]
    pub fn effective_headers(&self) -> HashMap<String, String> {
        let mut headers = self.headers.clone();
        if let Some(value) = self.cache.as_ref().and_then(CacheMode::as_cache_control) {
            let overridden = headers
                .keys()
                .any(|key| key.eq_ignore_ascii_case("cache-control"));
            if !overridden {
                headers.insert("Cache-Control".to_string(), value.to_string());
            }
        }
        headers
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    url: Url,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    cache: Option<CacheMode>,
}

impl HttpRequestBuilder {
    fn new(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
            timeout: None,
            cache: None,
        }
    }

    /// Adds a single header, replacing any header of the same name
    /// regardless of letter case.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        self.headers.insert(key, value.into());
        self
    }

    /// Adds every header in `headers`.
    #[must_use]
    pub fn headers<'a>(self, headers: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        headers
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header(key.clone(), value.clone()))
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the cache hint.
    #[must_use]
    pub const fn cache(mut self, cache: Option<CacheMode>) -> Self {
        self.cache = cache;
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            url: self.url,
            headers: self.headers,
            timeout: self.timeout,
            cache: self.cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://cms.example.com/jsonapi/node/page").unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let request = HttpRequest::builder(url()).build();
        assert!(request.headers.is_empty());
        assert!(request.timeout.is_none());
        assert!(request.cache.is_none());
    }

    #[test]
    fn test_builder_sets_headers_and_deadline() {
        let extra = HashMap::from([("X-Trace".to_string(), "1".to_string())]);
        let request = HttpRequest::builder(url())
            .header("Accept-Language", "de")
            .headers(&extra)
            .timeout(Some(Duration::from_secs(2)))
            .build();

        assert_eq!(request.headers.get("Accept-Language"), Some(&"de".to_string()));
        assert_eq!(request.headers.get("X-Trace"), Some(&"1".to_string()));
        assert_eq!(request.timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_cache_hint_becomes_cache_control() {
        let request = HttpRequest::builder(url())
            .cache(Some(CacheMode::NoStore))
            .build();
        assert_eq!(
            request.effective_headers().get("Cache-Control"),
            Some(&"no-store".to_string())
        );
    }

    #[test]
    fn test_explicit_cache_control_header_wins() {
        let request = HttpRequest::builder(url())
            .header("Cache-Control", "max-age=60")
            .cache(Some(CacheMode::Reload))
            .build();
        assert_eq!(
            request.effective_headers().get("Cache-Control"),
            Some(&"max-age=60".to_string())
        );
    }

    #[test]
    fn test_lower_case_cache_control_header_wins() {
        let request = HttpRequest::builder(url())
            .header("cache-control", "max-age=60")
            .cache(Some(CacheMode::NoStore))
            .build();
        let headers = request.effective_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("cache-control"), Some(&"max-age=60".to_string()));
    }

    #[test]
    fn test_header_replaces_same_name_in_any_case() {
        let request = HttpRequest::builder(url())
            .header("Accept-Language", "de")
            .header("accept-language", "fr")
            .build();

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers.get("accept-language"), Some(&"fr".to_string()));
    }

    #[test]
    fn test_default_cache_mode_adds_nothing() {
        let request = HttpRequest::builder(url())
            .cache(Some(CacheMode::Default))
            .build();
        assert!(request.effective_headers().is_empty());
    }
}
