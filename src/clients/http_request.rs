//! HTTP request types for the Freshservice API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Freshservice API.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Freshservice API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources and invoking actions.
    Put,
    /// HTTP DELETE method for removing or deactivating resources.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the Freshservice API.
///
/// The path is absolute (e.g. `/api/v2/requesters/42`) and the query is kept
/// as a raw string so filter output and page cursors pass through verbatim.
///
/// # Example
///
/// ```rust
/// use freshservice::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/v2/requesters")
///     .query("page=2")
///     .build()
///     .unwrap();
/// assert_eq!(request.path_and_query(), "/api/v2/requesters?page=2");
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/api/v2/requester_groups")
///     .body(json!({"name": "VIP"}))
///     .build()
///     .unwrap();
/// assert!(request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute path for this request.
    pub path: String,
    /// The raw query string, without the leading `?`.
    pub query: Option<String>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Returns the path followed by `?query` when a non-empty query is set.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` does not start with `/` or contains a `?`
    /// - a body is attached to a GET or DELETE request
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') || self.path.contains('?') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        if self.body.is_some() && matches!(self.http_method, HttpMethod::Get | HttpMethod::Delete)
        {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Option<String>,
    body: Option<serde_json::Value>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    /// Sets the raw query string. An empty string clears it.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query: String = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Appends a single `key=value` pair, percent-encoding the value.
    ///
    /// Calling this repeatedly with the same key produces repeated pairs.
    #[must_use]
    pub fn query_param(mut self, key: &str, value: impl fmt::Display) -> Self {
        let pair = format!("{key}={}", urlencoding::encode(&value.to_string()));
        self.query = Some(match self.query.take() {
            Some(existing) => format!("{existing}&{pair}"),
            None => pair,
        });
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}
