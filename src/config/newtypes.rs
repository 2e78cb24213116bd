//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so the client
//! never has to re-check a base URL or prefix on the request path.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Drupal site origin.
///
/// The value must be non-empty and parse as an absolute URL. A trailing
/// slash is trimmed so that API paths can be appended directly. The scheme
/// is kept as given; requests are upgraded to `https` when URLs are built.
///
/// # Example
///
/// ```rust
/// use drupal_fetch::BaseUrl;
///
/// let base = BaseUrl::new("https://cms.example.com/").unwrap();
/// assert_eq!(base.as_ref(), "https://cms.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the value is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it cannot be parsed.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        match url::Url::parse(trimmed) {
            Ok(parsed) if parsed.has_host() => Ok(Self(trimmed.to_string())),
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The path prefix under which the JSON:API module is mounted.
///
/// Defaults to `/jsonapi`. A trailing slash is trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPrefix(String);

impl ApiPrefix {
    /// The prefix Drupal core uses unless the site overrides it.
    pub const DEFAULT: &'static str = "/jsonapi";

    /// Creates a new validated API prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiPrefix`] if the prefix does not
    /// start with `/` or contains whitespace or a query/fragment marker.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');

        let valid = trimmed.starts_with('/')
            && !trimmed.chars().any(|c| c.is_whitespace() || c == '?' || c == '#');
        if !valid {
            return Err(ConfigError::InvalidApiPrefix { prefix });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl Default for ApiPrefix {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for ApiPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language tag identifying the content translation to request.
///
/// Tags are lowercased; letters, digits and hyphens are accepted
/// (e.g. `en`, `mi`, `pt-br`).
///
/// # Example
///
/// ```rust
/// use drupal_fetch::Locale;
///
/// let locale = Locale::new("EN").unwrap();
/// assert_eq!(locale.as_ref(), "en");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Creates a new validated locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] for empty or malformed tags.
    pub fn new(locale: impl Into<String>) -> Result<Self, ConfigError> {
        let locale = locale.into();
        let normalized = locale.trim().to_lowercase();

        let valid = !normalized.is_empty()
            && !normalized.starts_with('-')
            && !normalized.ends_with('-')
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidLocale { locale });
        }

        Ok(Self(normalized))
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_rejects_empty_string() {
        assert!(matches!(BaseUrl::new(""), Err(ConfigError::EmptyBaseUrl)));
        assert!(matches!(BaseUrl::new("   "), Err(ConfigError::EmptyBaseUrl)));
        assert!(matches!(BaseUrl::new("/"), Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn test_base_url_rejects_unparseable_values() {
        assert!(matches!(
            BaseUrl::new("cms.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(BaseUrl::new("https://").is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let base = BaseUrl::new("http://cms.example.com/").unwrap();
        assert_eq!(base.as_ref(), "http://cms.example.com");
    }

    #[test]
    fn test_base_url_keeps_subdirectory() {
        let base = BaseUrl::new("https://example.com/cms/").unwrap();
        assert_eq!(base.as_ref(), "https://example.com/cms");
    }

    #[test]
    fn test_base_url_accepts_ports_and_ipv6_hosts() {
        let base = BaseUrl::new("http://localhost:8080").unwrap();
        assert_eq!(base.as_ref(), "http://localhost:8080");

        let base = BaseUrl::new("http://[::1]:8080/").unwrap();
        assert_eq!(base.as_ref(), "http://[::1]:8080");
    }

    #[test]
    fn test_api_prefix_defaults_to_jsonapi() {
        assert_eq!(ApiPrefix::default().as_ref(), "/jsonapi");
    }

    #[test]
    fn test_api_prefix_validation() {
        assert_eq!(ApiPrefix::new("/api/").unwrap().as_ref(), "/api");
        assert!(ApiPrefix::new("api").is_err());
        assert!(ApiPrefix::new("").is_err());
        assert!(ApiPrefix::new("/json api").is_err());
        assert!(ApiPrefix::new("/jsonapi?x=1").is_err());
    }

    #[test]
    fn test_locale_normalizes_and_validates() {
        assert_eq!(Locale::new("MI").unwrap().as_ref(), "mi");
        assert_eq!(Locale::new("pt-BR").unwrap().as_ref(), "pt-br");
        assert!(Locale::new("").is_err());
        assert!(Locale::new("-en").is_err());
        assert!(Locale::new("en_US").is_err());
    }

    #[test]
    fn test_locale_serde_round_trip() {
        let locale: Locale = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(serde_json::to_string(&locale).unwrap(), r#""en""#);
        assert!(serde_json::from_str::<Locale>(r#""not valid""#).is_err());
    }
}
