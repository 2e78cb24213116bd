//! Request URL construction.

use url::Url;

use crate::clients::errors::FetchError;
use crate::query::QueryParams;

/// Builds an absolute `https` request URL.
///
/// A `path` starting with `/` is appended to `base` verbatim, so a base that
/// carries its own path (a site installed under `/cms`) keeps it. Any other
/// `path` must be an absolute URL, such as an endpoint taken from the
/// JSON:API index. Non-empty `params` become the query string. The scheme is
/// always switched to `https`.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if the result does not parse or its
/// scheme cannot be switched to `https`.
///
/// # Example
///
/// ```rust
/// use drupal_fetch::clients::build_url;
/// use drupal_fetch::query::QueryParams;
///
/// let params = QueryParams::new().add_filter("status", "1");
/// let url = build_url("/jsonapi/node/article", "http://cms.example.com", Some(&params)).unwrap();
///
/// assert_eq!(
///     url.as_str(),
///     "https://cms.example.com/jsonapi/node/article?filter[status]=1"
/// );
/// ```
pub fn build_url(path: &str, base: &str, params: Option<&QueryParams>) -> Result<Url, FetchError> {
    let raw = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        path.to_string()
    };

    let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if let Some(query) = params.map(QueryParams::to_query_string) {
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
    }

    url.set_scheme("https").map_err(|()| FetchError::InvalidUrl {
        url: raw,
        reason: "scheme cannot be switched to https".to_string(),
    })?;

    Ok(url)
}
