//! Configuration types for the Freshservice API SDK.
//!
//! # Overview
//!
//! - [`FreshserviceConfig`]: The configuration struct holding all SDK settings
//! - [`FreshserviceConfigBuilder`]: A builder for constructing [`FreshserviceConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`FreshserviceDomain`]: A validated Freshservice domain
//! - [`HostUrl`]: A validated base URL override
//!
//! # Example
//!
//! ```rust
//! use freshservice::{ApiKey, FreshserviceConfig, FreshserviceDomain};
//!
//! let config = FreshserviceConfig::builder()
//!     .domain(FreshserviceDomain::new("acme").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.domain().as_ref(), "acme.freshservice.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, FreshserviceDomain, HostUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Freshservice API SDK.
///
/// Immutable once built. `FreshserviceConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct FreshserviceConfig {
    domain: FreshserviceDomain,
    api_key: ApiKey,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl FreshserviceConfig {
    /// Creates a new builder for constructing a `FreshserviceConfig`.
    #[must_use]
    pub fn builder() -> FreshserviceConfigBuilder {
        FreshserviceConfigBuilder::new()
    }

    /// Returns the Freshservice domain.
    #[must_use]
    pub const fn domain(&self) -> &FreshserviceDomain {
        &self.domain
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify FreshserviceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FreshserviceConfig>();
};

/// Builder for constructing [`FreshserviceConfig`] instances.
///
/// `domain` and `api_key` are required.
///
/// # Defaults
///
/// - `api_host`: `None` (requests go to `https://<domain>`)
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct FreshserviceConfigBuilder {
    domain: Option<FreshserviceDomain>,
    api_key: Option<ApiKey>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl FreshserviceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Freshservice domain (required).
    #[must_use]
    pub fn domain(mut self, domain: FreshserviceDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Overrides the scheme and host requests are sent to.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`FreshserviceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `domain` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<FreshserviceConfig, ConfigError> {
        let domain = self
            .domain
            .ok_or(ConfigError::MissingRequiredField { field: "domain" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(FreshserviceConfig {
            domain,
            api_key,
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
