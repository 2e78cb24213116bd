//! Error types for HTTP transport and client operations.
//!
//! - [`HttpResponseError`]: a non-2xx response, displayed as its status text
//! - [`HttpError`]: anything that can go wrong sending one request
//! - [`FetchError`]: failures of [`DrupalClient`](crate::DrupalClient) operations
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_fetch::{FetchError, HttpError};
//!
//! match client.get_resource("node--article", id, RequestOptions::new()).await {
//!     Ok(graph) => println!("{} resources", graph.len()),
//!     Err(FetchError::Http(HttpError::Response(e))) => {
//!         println!("Drupal answered {}: {}", e.code, e);
//!     }
//!     Err(FetchError::Http(HttpError::Timeout { after })) => {
//!         println!("Gave up after {after:?}");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::jsonapi::ErrorObject;

/// Error returned when a request receives a non-successful response.
///
/// The message is the response's status text (e.g. `Not Found`).
///
/// # Example
///
/// ```rust
/// use drupal_fetch::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Not Found".to_string(),
///     error_reference: None,
/// };
///
/// assert_eq!(error.to_string(), "Not Found");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The status text of the response.
    pub message: String,
    /// Request id reported by the server (`X-Request-Id`), if any.
    pub error_reference: Option<String>,
}

/// Unified error type for sending a single HTTP request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The per-call deadline elapsed before a response arrived.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The deadline that elapsed.
        after: Duration,
    },
}

/// Error returned by [`DrupalClient`](crate::DrupalClient) operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or the server answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A request URL could not be built.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL, or the path the URL was built from.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// The response body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned a JSON:API document carrying error objects.
    #[error("JSON:API error document: {}", summarize(.errors))]
    Document {
        /// The error objects from the document.
        errors: Vec<ErrorObject>,
    },

    /// A view name did not have the `view_id--display_id` form.
    #[error("Invalid view name '{name}': expected 'view_id--display_id'")]
    InvalidViewName {
        /// The rejected name.
        name: String,
    },
}

fn summarize(errors: &[ErrorObject]) -> String {
    errors
        .iter()
        .map(ErrorObject::message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_error_displays_status_text() {
        let error = HttpError::Response(HttpResponseError {
            code: 404,
            message: "Not Found".to_string(),
            error_reference: None,
        });
        assert_eq!(error.to_string(), "Not Found");

        let fetch: FetchError = error.into();
        assert_eq!(fetch.to_string(), "Not Found");
    }

    #[test]
    fn test_timeout_error_names_deadline() {
        let error = HttpError::Timeout {
            after: Duration::from_millis(250),
        };
        assert_eq!(error.to_string(), "Request timed out after 250ms");
    }

    #[test]
    fn test_document_error_joins_messages() {
        let error = FetchError::Document {
            errors: vec![
                ErrorObject {
                    title: Some("Forbidden".to_string()),
                    ..ErrorObject::default()
                },
                ErrorObject {
                    detail: Some("Missing field".to_string()),
                    ..ErrorObject::default()
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "JSON:API error document: Forbidden; Missing field"
        );
    }

    #[test]
    fn test_invalid_view_name_message() {
        let error = FetchError::InvalidViewName {
            name: "frontpage".to_string(),
        };
        assert!(error.to_string().contains("'frontpage'"));
    }

    #[test]
    fn test_error_sources() {
        use std::error::Error as _;

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = FetchError::from(parse);
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("Invalid response body: "));

        let error = FetchError::InvalidUrl {
            url: "/x".to_string(),
            reason: "bad".to_string(),
        };
        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Invalid request URL '/x': bad");
    }
}
