//! Per-operation handling of non-success responses.
//!
//! | Operation | Non-2xx response |
//! |---|---|
//! | resources, collections, menus, views | error carrying the status text |
//! | path translation | `None` |
//! | index | `None` (logged by the index lookup) |

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_response::HttpResponse;

/// The client operation a response belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A single resource by id.
    GetResource,
    /// A resource collection.
    GetCollection,
    /// Menu items.
    GetMenu,
    /// View results.
    GetView,
    /// Path translation through the decoupled router.
    GetPathData,
    /// The JSON:API index.
    GetIndex,
}

/// What to do with a non-success response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the operation with the status text.
    Raise,
    /// Treat as "not found" and return nothing.
    SoftMiss,
    /// Return nothing; the caller logs the failure.
    Swallow,
}

impl Operation {
    /// Returns how this operation treats non-success responses.
    #[must_use]
    pub const fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::GetResource | Self::GetCollection | Self::GetMenu | Self::GetView => {
                FailurePolicy::Raise
            }
            Self::GetPathData => FailurePolicy::SoftMiss,
            Self::GetIndex => FailurePolicy::Swallow,
        }
    }
}

/// Applies `operation`'s failure policy to `response`.
///
/// Successful responses pass through as `Ok(Some(_))`. Non-success
/// responses become `Err` under [`FailurePolicy::Raise`] and `Ok(None)`
/// otherwise.
///
/// # Errors
///
/// Returns [`HttpError::Response`] with the response's status text as its
/// message when the policy is [`FailurePolicy::Raise`].
pub fn classify(
    operation: Operation,
    response: HttpResponse,
) -> Result<Option<HttpResponse>, HttpError> {
    if response.is_ok() {
        return Ok(Some(response));
    }

    match operation.failure_policy() {
        FailurePolicy::Raise => Err(HttpError::Response(HttpResponseError {
            code: response.code,
            error_reference: response.request_id().map(String::from),
            message: response.status_text,
        })),
        FailurePolicy::Swallow => Ok(None),
        FailurePolicy::SoftMiss => {
            tracing::debug!(
                "{operation:?} received {} {}; treating as not found",
                response.code,
                response.status_text
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), "")
    }

    #[test]
    fn test_policies_per_operation() {
        assert_eq!(Operation::GetResource.failure_policy(), FailurePolicy::Raise);
        assert_eq!(Operation::GetCollection.failure_policy(), FailurePolicy::Raise);
        assert_eq!(Operation::GetMenu.failure_policy(), FailurePolicy::Raise);
        assert_eq!(Operation::GetView.failure_policy(), FailurePolicy::Raise);
        assert_eq!(Operation::GetPathData.failure_policy(), FailurePolicy::SoftMiss);
        assert_eq!(Operation::GetIndex.failure_policy(), FailurePolicy::Swallow);
    }

    #[test]
    fn test_success_passes_through() {
        let result = classify(Operation::GetResource, response(200)).unwrap();
        assert_eq!(result.unwrap().code, 200);
    }

    #[test]
    fn test_raise_carries_status_text() {
        let error = classify(Operation::GetResource, response(404)).unwrap_err();
        assert_eq!(error.to_string(), "Not Found");
        assert!(matches!(error, HttpError::Response(HttpResponseError { code: 404, .. })));
    }

    #[test]
    fn test_raise_without_reason_phrase_uses_code() {
        let error = classify(Operation::GetView, response(520)).unwrap_err();
        assert_eq!(error.to_string(), "520");
    }

    #[test]
    fn test_raise_keeps_request_id() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-9".to_string()]);
        let error = classify(Operation::GetMenu, HttpResponse::new(500, headers, "")).unwrap_err();

        let HttpError::Response(inner) = error else {
            panic!("expected a response error");
        };
        assert_eq!(inner.error_reference.as_deref(), Some("req-9"));
        assert_eq!(inner.message, "Internal Server Error");
    }

    #[test]
    fn test_soft_miss_and_swallow_return_none() {
        assert!(classify(Operation::GetPathData, response(404)).unwrap().is_none());
        assert!(classify(Operation::GetIndex, response(503)).unwrap().is_none());
    }
}
