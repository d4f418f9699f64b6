//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Freshservice API key.
///
/// The key is sent as the Basic auth username on every request. It is
/// non-empty and masked in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use freshservice::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated Freshservice domain.
///
/// # Accepted Formats
///
/// - `acme` - normalized to `acme.freshservice.com`
/// - `acme.freshservice.com` - used as-is
/// - `helpdesk.acme.com` - custom (vanity) domains are used as-is
///
/// # Example
///
/// ```rust
/// use freshservice::FreshserviceDomain;
///
/// let domain = FreshserviceDomain::new("acme").unwrap();
/// assert_eq!(domain.as_ref(), "acme.freshservice.com");
///
/// let domain = FreshserviceDomain::new("helpdesk.acme.com").unwrap();
/// assert_eq!(domain.as_ref(), "helpdesk.acme.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreshserviceDomain(String);

impl FreshserviceDomain {
    const SUFFIX: &'static str = ".freshservice.com";

    /// Creates a new validated domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain: String = domain.into();
        let domain = domain.trim().to_lowercase();

        let full_domain = if domain.contains('.') {
            domain
        } else {
            format!("{domain}{}", Self::SUFFIX)
        };

        if !full_domain.split('.').all(Self::is_valid_label) {
            return Err(ConfigError::InvalidDomain {
                domain: full_domain,
            });
        }

        Ok(Self(full_domain))
    }

    fn is_valid_label(label: &str) -> bool {
        if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
            return false;
        }

        label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for FreshserviceDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for FreshserviceDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FreshserviceDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL overriding `https://<domain>`.
///
/// Used to route requests through a proxy, or at a local mock server in tests.
/// Any trailing slash is dropped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use freshservice::HostUrl;
///
/// let url = HostUrl::new("http://localhost:3000/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), Some("localhost"));
/// assert_eq!(url.as_ref(), "http://localhost:3000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        // Host ends at port, path, query, or end of string
        let host_end = url[host_start..]
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("super-secret-key").unwrap();
        let debug_output = format!("{:?}", key);
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_domain_normalizes_short_format() {
        let domain = FreshserviceDomain::new("Acme").unwrap();
        assert_eq!(domain.as_ref(), "acme.freshservice.com");
    }

    #[test]
    fn test_domain_accepts_full_and_custom_formats() {
        let domain = FreshserviceDomain::new("acme.freshservice.com").unwrap();
        assert_eq!(domain.as_ref(), "acme.freshservice.com");

        let domain = FreshserviceDomain::new(" support.acme.io ").unwrap();
        assert_eq!(domain.as_ref(), "support.acme.io");
    }

    #[test]
    fn test_domain_rejects_invalid_domains() {
        assert!(FreshserviceDomain::new("").is_err());
        assert!(FreshserviceDomain::new("my company").is_err());
        assert!(FreshserviceDomain::new("my_company").is_err());
        assert!(FreshserviceDomain::new("-acme").is_err());
        assert!(FreshserviceDomain::new("acme..freshservice.com").is_err());
        assert!(FreshserviceDomain::new("https://acme.freshservice.com").is_err());
    }

    #[test]
    fn test_domain_round_trip_serialization() {
        let original = FreshserviceDomain::new("acme").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""acme.freshservice.com""#);
        let restored: FreshserviceDomain = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_host_url_validates_format() {
        let url = HostUrl::new("https://proxy.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), Some("proxy.example.com"));

        let url = HostUrl::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("127.0.0.1"));
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("proxy.example.com").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("://example.com").is_err());
    }
}
