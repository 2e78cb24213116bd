//! Configuration types for the Drupal JSON:API client.
//!
//! # Overview
//!
//! - [`DrupalConfig`]: immutable client configuration, produced once
//! - [`DrupalConfigBuilder`]: a builder for [`DrupalConfig`]
//! - [`BaseUrl`]: a validated site origin
//! - [`ApiPrefix`]: the JSON:API mount path (default `/jsonapi`)
//! - [`Locale`]: a validated language tag
//!
//! # Example
//!
//! ```rust
//! use drupal_fetch::{BaseUrl, DrupalConfig};
//!
//! let config = DrupalConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .debug(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_prefix().as_ref(), "/jsonapi");
//! assert!(config.debug());
//! ```

mod newtypes;

pub use newtypes::{ApiPrefix, BaseUrl, Locale};

use crate::error::ConfigError;

/// Configuration for a [`DrupalClient`](crate::DrupalClient).
///
/// The configuration is fixed at construction and never mutated. Every
/// operation reads it by reference.
///
/// # Thread Safety
///
/// `DrupalConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct DrupalConfig {
    base_url: BaseUrl,
    api_prefix: ApiPrefix,
    debug: bool,
    user_agent_prefix: Option<String>,
}

impl DrupalConfig {
    /// Creates a new builder for constructing a `DrupalConfig`.
    #[must_use]
    pub fn builder() -> DrupalConfigBuilder {
        DrupalConfigBuilder::new()
    }

    /// Builds a configuration with defaults from a raw base URL string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] or
    /// [`ConfigError::InvalidBaseUrl`] if the URL is rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drupal_fetch::{ConfigError, DrupalConfig};
    ///
    /// assert!(DrupalConfig::from_base_url("https://cms.example.com").is_ok());
    /// assert!(matches!(
    ///     DrupalConfig::from_base_url(""),
    ///     Err(ConfigError::EmptyBaseUrl)
    /// ));
    /// ```
    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().base_url(BaseUrl::new(base_url)?).build()
    }

    /// Returns the site origin.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the JSON:API path prefix.
    #[must_use]
    pub const fn api_prefix(&self) -> &ApiPrefix {
        &self.api_prefix
    }

    /// Returns whether diagnostic logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify DrupalConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DrupalConfig>();
};

/// Builder for constructing [`DrupalConfig`] instances.
///
/// `base_url` is required.
///
/// # Defaults
///
/// - `api_prefix`: `/jsonapi`
/// - `debug`: `false`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct DrupalConfigBuilder {
    base_url: Option<BaseUrl>,
    api_prefix: Option<ApiPrefix>,
    debug: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl DrupalConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site origin (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the JSON:API path prefix.
    #[must_use]
    pub fn api_prefix(mut self, prefix: ApiPrefix) -> Self {
        self.api_prefix = Some(prefix);
        self
    }

    /// Enables or disables diagnostic logging.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`DrupalConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<DrupalConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(DrupalConfig {
            base_url,
            api_prefix: self.api_prefix.unwrap_or_default(),
            debug: self.debug.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = DrupalConfigBuilder::new().debug(true).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = DrupalConfig::builder()
            .base_url(BaseUrl::new("https://cms.example.com").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://cms.example.com");
        assert_eq!(config.api_prefix().as_ref(), "/jsonapi");
        assert!(!config.debug());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = DrupalConfig::builder()
            .base_url(BaseUrl::new("https://cms.example.com").unwrap())
            .api_prefix(ApiPrefix::new("/api").unwrap())
            .debug(true)
            .user_agent_prefix("MySite/2.0")
            .build()
            .unwrap();

        assert_eq!(config.api_prefix().as_ref(), "/api");
        assert!(config.debug());
        assert_eq!(config.user_agent_prefix(), Some("MySite/2.0"));
    }

    #[test]
    fn test_from_base_url_rejects_empty() {
        assert!(matches!(
            DrupalConfig::from_base_url(""),
            Err(ConfigError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = DrupalConfig::from_base_url("https://cms.example.com").unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.base_url(), config.base_url());
        assert!(format!("{config:?}").contains("DrupalConfig"));
    }
}
