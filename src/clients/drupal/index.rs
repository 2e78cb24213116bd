//! JSON:API index lookup and resource endpoint resolution.
//!
//! The index is fetched fresh for every lookup; nothing is cached between
//! calls.

use thiserror::Error;

use super::DrupalClient;
use crate::clients::errors::HttpError;
use crate::clients::http_client::Transport;
use crate::clients::http_request::HttpRequest;
use crate::clients::policy::{classify, Operation};
use crate::clients::url_builder::build_url;
use crate::config::Locale;
use crate::jsonapi::IndexDocument;

/// Why the JSON:API index could not be used.
///
/// These errors are logged by [`DrupalClient::get_index`] and
/// [`DrupalClient::resource_endpoint`], which report failure as `None`.
/// [`DrupalClient::try_get_index`] returns them directly.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index URL could not be built.
    #[error("Invalid JSON:API index URL: {reason}")]
    InvalidUrl {
        /// Why the URL was rejected.
        reason: String,
    },

    /// No response could be obtained.
    #[error("Failed to fetch JSON:API index: {0}")]
    Transport(#[from] HttpError),

    /// The server answered with a non-success status.
    #[error("JSON:API index returned {code} {status_text}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The status text.
        status_text: String,
    },

    /// The body was not an index document.
    #[error("Failed to parse JSON:API index: {0}")]
    Parse(#[from] serde_json::Error),

    /// The index has no endpoint for the requested type.
    #[error("Resource of type '{resource_type}' and locale {} not found", .locale.as_deref().unwrap_or("(none)"))]
    EndpointNotFound {
        /// The requested resource type.
        resource_type: String,
        /// The requested locale, if any.
        locale: Option<String>,
    },
}

impl<T: Transport> DrupalClient<T> {
    /// Fetches the JSON:API index, reporting why it failed.
    ///
    /// The request carries no query and no caller options.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] describing the failure.
    pub async fn try_get_index(&self) -> Result<IndexDocument, IndexError> {
        let url = build_url(
            self.config.api_prefix().as_ref(),
            self.config.base_url().as_ref(),
            None,
        )
        .map_err(|e| IndexError::InvalidUrl {
            reason: e.to_string(),
        })?;
        self.log_debug(format_args!("Fetching JSON:API index {url}"));

        let response = self.transport.send(HttpRequest::builder(url).build()).await?;
        let code = response.code;
        let status_text = response.status_text.clone();
        let Some(response) = classify(Operation::GetIndex, response)? else {
            return Err(IndexError::Status { code, status_text });
        };

        Ok(serde_json::from_value(response.json()?)?)
    }

    /// Fetches the JSON:API index.
    ///
    /// Any failure is logged and reported as `None`.
    pub async fn get_index(&self) -> Option<IndexDocument> {
        match self.try_get_index().await {
            Ok(index) => Some(index),
            Err(error) => {
                tracing::error!("{error}");
                None
            }
        }
    }

    /// Looks up the endpoint URL for `resource_type` in a freshly fetched index.
    ///
    /// The locale is only used in diagnostics. A missing endpoint is logged
    /// and reported as `None`.
    pub async fn resource_endpoint(
        &self,
        resource_type: &str,
        locale: Option<&Locale>,
    ) -> Option<String> {
        let index = self.get_index().await?;
        if let Some(endpoint) = index.endpoint(resource_type) {
            return Some(endpoint.to_string());
        }

        let error = IndexError::EndpointNotFound {
            resource_type: resource_type.to_string(),
            locale: locale.map(ToString::to_string),
        };
        tracing::error!("{error}");
        None
    }
}
