//! HTTP client for Freshservice API communication.
//!
//! This module provides the [`HttpClient`] type, the single request pipeline
//! every resource service goes through.

use std::collections::HashMap;
use std::fmt;

use base64::prelude::*;
use serde::de::DeserializeOwned;

use crate::clients::errors::{ErrorResponse, HttpError, HttpResponseError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::FreshserviceConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Password paired with the API key in the Basic auth credential.
const BASIC_AUTH_PASSWORD: &str = "X";

/// HTTP client for making requests to the Freshservice API.
///
/// The client handles:
/// - Base URI construction from the domain or the `api_host` override
/// - Default headers including User-Agent and the Basic auth credential
/// - JSON body decoding into caller-supplied containers
/// - Mapping non-2xx responses to [`HttpResponseError`]
///
/// Every request is attempted exactly once. Cancellation is done by dropping
/// the returned future; a configured timeout surfaces as [`HttpError::Network`].
///
/// # Thread Safety
///
/// `HttpClient` is immutable after construction and `Send + Sync`.
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://acme.freshservice.com`).
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use freshservice::{ApiKey, FreshserviceConfig, FreshserviceDomain};
    /// use freshservice::clients::HttpClient;
    ///
    /// let config = FreshserviceConfig::builder()
    ///     .domain(FreshserviceDomain::new("acme").unwrap())
    ///     .api_key(ApiKey::new("my-api-key").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config).unwrap();
    /// assert_eq!(client.base_uri(), "https://acme.freshservice.com");
    /// ```
    pub fn new(config: &FreshserviceConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_reqwest_client(config, builder.build()?))
    }

    /// Creates a new HTTP client on top of a caller-supplied reqwest client.
    ///
    /// The configured timeout is not applied; the supplied client's own
    /// settings are used as-is.
    #[must_use]
    pub fn with_reqwest_client(config: &FreshserviceConfig, client: reqwest::Client) -> Self {
        let base_uri = config.api_host().map_or_else(
            || format!("https://{}", config.domain().as_ref()),
            |host| host.as_ref().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Freshservice API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let credential = BASE64_STANDARD.encode(format!(
            "{}:{BASIC_AUTH_PASSWORD}",
            config.api_key().as_ref()
        ));

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Authorization".to_string(), format!("Basic {credential}"));

        Self {
            client,
            base_uri,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL a request is sent to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        format!("{}{}", self.base_uri, request.path_and_query())
    }

    /// Sends a request and maps non-2xx responses to errors, without decoding
    /// the body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A transport error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        tracing::debug!(method = %request.http_method, path = %request.path, "Sending Freshservice request");

        let mut req_builder = self
            .client
            .request(request.http_method.as_reqwest(), url.as_str());

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, headers, body);
        tracing::debug!(status = code, path = %request.path, "Received Freshservice response");

        if response.is_ok() {
            return Ok(response);
        }

        let error_response = ErrorResponse::from_body(&response.body);
        tracing::warn!(
            status = code,
            method = %request.http_method,
            path = %request.path,
            "Freshservice request failed: {}",
            error_response
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            error_response,
        }))
    }

    /// Sends a request and decodes a successful JSON body into `result`.
    ///
    /// `result` is only written when the response is 2xx and carries a body;
    /// an empty body (e.g. `204 No Content`) leaves it untouched. The raw
    /// response is returned so callers can inspect headers such as `Link`.
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns, plus [`HttpError::Decode`]
    /// when a 2xx body does not match `T`. On error `result` is untouched.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = HttpRequest::builder(HttpMethod::Get, "/api/v2/requesters/42").build()?;
    /// let mut requester = Requester::default();
    /// let response = client.make_request(request, Some(&mut requester)).await?;
    /// ```
    pub async fn make_request<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        result: Option<&mut T>,
    ) -> Result<HttpResponse, HttpError> {
        let response = self.send(request).await?;

        if let Some(container) = result {
            if !response.body.trim().is_empty() {
                *container = response.json().map_err(|e| {
                    tracing::warn!(status = response.code, "Failed to decode Freshservice response body: {}", e);
                    e
                })?;
            }
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The Authorization header carries the API key
        let mut header_names: Vec<&str> = self.default_headers.keys().map(String::as_str).collect();
        header_names.sort_unstable();

        f.debug_struct("HttpClient")
            .field("base_uri", &self.base_uri)
            .field("default_headers", &header_names)
            .finish_non_exhaustive()
    }
}
