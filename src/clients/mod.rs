//! HTTP client types for Freshservice API communication.
//!
//! This module provides the request/response pipeline shared by every
//! resource service.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client; [`HttpClient::make_request`] is the
//!   single dispatch operation
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A response from the API, with pagination and rate limit helpers
//! - [`has_next_page`]: Next-page cursor extraction from the `Link` header
//! - [`HttpError`]: Transport, decode and API errors
//! - [`ErrorResponse`]: The API's error payload
//!
//! # Example
//!
//! ```rust,ignore
//! use freshservice::clients::{HttpClient, HttpMethod, HttpRequest, has_next_page};
//! use freshservice::resources::Requesters;
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/v2/requesters").build()?;
//! let mut requesters = Requesters::default();
//! let response = client.make_request(request, Some(&mut requesters)).await?;
//!
//! if let Some(cursor) = has_next_page(&response) {
//!     println!("More results at ?{cursor}");
//! }
//! ```
//!
//! # Retry Behavior
//!
//! None. Each call is a single attempt; errors propagate to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ErrorResponse, FieldError, HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{has_next_page, parse_next_link, HttpResponse, RateLimit};
