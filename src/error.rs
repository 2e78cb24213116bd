//! Configuration error types for the Drupal JSON:API client.
//!
//! Errors raised while talking to a backend live in
//! [`clients`](crate::clients); this module only covers the values that are
//! validated once, when a [`DrupalConfig`](crate::DrupalConfig) is built.
//!
//! # Example
//!
//! ```rust
//! use drupal_fetch::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
///
/// Every variant is fatal: a client cannot be constructed from a
/// configuration that failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL cannot be empty.
    #[error("The base URL cannot be empty. Please provide the Drupal site origin (e.g., 'https://cms.example.com').")]
    EmptyBaseUrl,

    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://cms.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The API prefix is invalid.
    #[error("Invalid API prefix '{prefix}'. The prefix must start with '/' (e.g., '/jsonapi').")]
    InvalidApiPrefix {
        /// The invalid prefix that was provided.
        prefix: String,
    },

    /// The locale tag is invalid.
    #[error("Invalid locale '{locale}'. Expected a language tag such as 'en' or 'pt-br'.")]
    InvalidLocale {
        /// The invalid locale that was provided.
        locale: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
