//! The [`Client`] facade handing out resource services.

use crate::clients::{HttpClient, HttpError};
use crate::config::FreshserviceConfig;
use crate::resources::{AgentService, RequesterGroupService, RequesterService, TicketService};

/// Entry point for the Freshservice API.
///
/// Owns the shared [`HttpClient`]; every service handle borrows it, so handles
/// are free to create and drop per call.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. Share it across tasks by reference or `Arc`.
///
/// # Example
///
/// ```rust
/// use freshservice::{ApiKey, Client, FreshserviceConfig, FreshserviceDomain};
///
/// let config = FreshserviceConfig::builder()
///     .domain(FreshserviceDomain::new("acme").unwrap())
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
///
/// let client = Client::new(&config).unwrap();
/// let _tickets = client.tickets();
/// ```
#[derive(Debug)]
pub struct Client {
    http_client: HttpClient,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP transport cannot be created.
    pub fn new(config: &FreshserviceConfig) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(base_uri = %http_client.base_uri(), "Created Freshservice client");
        Ok(Self { http_client })
    }

    /// Wraps an existing [`HttpClient`].
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    #[must_use]
    pub const fn tickets(&self) -> TicketService<'_> {
        TicketService::new(&self.http_client)
    }

    #[must_use]
    pub const fn requesters(&self) -> RequesterService<'_> {
        RequesterService::new(&self.http_client)
    }

    #[must_use]
    pub const fn requester_groups(&self) -> RequesterGroupService<'_> {
        RequesterGroupService::new(&self.http_client)
    }

    #[must_use]
    pub const fn agents(&self) -> AgentService<'_> {
        AgentService::new(&self.http_client)
    }
}
