//! Per-call options for [`DrupalClient`](super::DrupalClient) operations.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::http_request::CacheMode;
use crate::config::Locale;
use crate::query::QueryParams;

/// Transport-level options passed through to the request unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Extra request headers.
    pub headers: HashMap<String, String>,
    /// Cache hint.
    pub cache: Option<CacheMode>,
    /// Deadline for the request.
    pub timeout: Option<Duration>,
}

/// Options for a single client operation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use drupal_fetch::clients::RequestOptions;
/// use drupal_fetch::query::QueryParams;
/// use drupal_fetch::Locale;
///
/// let options = RequestOptions::new()
///     .params(QueryParams::new().add_include(["uid"]))
///     .locale(Locale::new("fr").unwrap())
///     .timeout(Duration::from_secs(10));
///
/// assert!(options.params.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Transport options.
    pub fetch: FetchOptions,
    /// Query parameters.
    pub params: Option<QueryParams>,
    /// Locale of the requested resources.
    pub locale: Option<Locale>,
    /// Resource revision to request (`resourceVersion`).
    pub version: Option<String>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Sets the resource version, e.g. `rel:latest-version` or `id:42`.
    ///
    /// The version is only sent when query parameters are set as well.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a request header, replacing one of the same name in any case.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.fetch
            .headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        self.fetch.headers.insert(key, value.into());
        self
    }

    /// Sets the cache hint.
    #[must_use]
    pub fn cache(mut self, cache: CacheMode) -> Self {
        self.fetch.cache = Some(cache);
        self
    }

    /// Sets the request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.fetch.timeout = Some(timeout);
        self
    }

    /// Returns the query parameters with the version stamp applied.
    ///
    /// `resourceVersion` is added only when both parameters and a version
    /// are present.
    #[must_use]
    pub fn versioned_params(&self) -> Option<QueryParams> {
        match (&self.params, &self.version) {
            (Some(params), Some(version)) => Some(
                params
                    .clone()
                    .add_custom_param("resourceVersion", version.as_str()),
            ),
            (params, _) => params.clone(),
        }
    }
}
