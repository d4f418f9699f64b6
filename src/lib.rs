//! # Freshservice API Rust SDK
//!
//! A typed async client for the Freshservice helpdesk REST API (`/api/v2`).
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`FreshserviceConfig`] and [`FreshserviceConfigBuilder`]
//! - Validated newtypes for the API key, account domain and host override
//! - A shared HTTP pipeline ([`HttpClient`]) with Basic auth, JSON decoding,
//!   `Link` header pagination and API error mapping
//! - Per-resource services for tickets, requesters, requester groups and agents
//! - Query filters ([`filters::QueryFilter`]) for list operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use freshservice::{ApiKey, Client, FreshserviceConfig, FreshserviceDomain};
//! use freshservice::resources::RequesterListFilter;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FreshserviceConfig::builder()
//!     .domain(FreshserviceDomain::new("acme")?)
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .build()?;
//!
//! let client = Client::new(&config)?;
//!
//! let filter = RequesterListFilter {
//!     email: Some("jane@example.com".to_string()),
//!     ..Default::default()
//! };
//! let (requesters, next_page) = client.requesters().list(Some(&filter)).await?;
//! println!("{} requesters, more: {}", requesters.list.len(), next_page.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pagination
//!
//! List operations return the cursor of the next page taken from the
//! `rel="next"` link. Pass it back as the filter's `page_query`; `None`
//! means the last page was reached.
//!
//! ## Error Handling
//!
//! Service methods return [`resources::ResourceError`]:
//! - `Validation`: input rejected locally, nothing was sent
//! - `Http`: transport failure, undecodable body, or a non-2xx response
//!   carrying the API's error payload
//! - `Encode`: a request body could not be serialized
//!
//! Requests are attempted once. Rate limit headers are exposed through
//! [`HttpResponse::rate_limit`] but never acted upon.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod filters;
pub mod resources;

pub use client::Client;
pub use config::{ApiKey, FreshserviceConfig, FreshserviceConfigBuilder, FreshserviceDomain, HostUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ErrorResponse, FieldError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError, RateLimit,
};

pub use filters::QueryFilter;
pub use resources::{ResourceError, ValidationError};
