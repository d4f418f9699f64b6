//! HTTP-specific error types for the Freshservice API SDK.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses, carrying the decoded [`ErrorResponse`]
//! - [`InvalidHttpRequestError`]: A request that fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use freshservice::clients::HttpError;
//!
//! match client.requesters().get(42).await {
//!     Ok(requester) => println!("Found: {:?}", requester.details.first_name),
//!     Err(ResourceError::Http(HttpError::Response(e))) => {
//!         println!("API error {}: {}", e.code, e.error_response);
//!         for error in &e.error_response.errors {
//!             println!("  {}: {}", error.field, error.message);
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Decodes an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single structured validation error returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The request field the error refers to. Empty for errors that are not
    /// tied to a field.
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,
    /// Human readable message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Machine readable code (e.g. `invalid_value`, `missing_field`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// The error payload returned by the Freshservice API.
///
/// Failure responses carry a `description` and a list of per-field `errors`.
/// Authorization failures use a flat `code`/`message` pair instead.
///
/// ```json
/// {
///   "description": "Validation failed",
///   "errors": [
///     {"field": "primary_email", "message": "It should be a valid email address", "code": "invalid_value"}
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Summary of the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Structured per-field validation errors.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<FieldError>,
    /// Top-level error code, used by authorization failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Top-level error message, used by authorization failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Decodes an error payload from a raw response body.
    ///
    /// Bodies that are not a JSON object (HTML error pages, plain text) are
    /// kept verbatim as the description.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        serde_json::from_str(trimmed).unwrap_or_else(|_| Self {
            description: Some(trimmed.to_string()),
            ..Self::default()
        })
    }

    /// Groups the per-field error messages by field name.
    #[must_use]
    pub fn messages_by_field(&self) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            result
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        result
    }

    /// Returns `true` if the payload carries no information at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.errors.is_empty()
            && self.code.is_none()
            && self.message.is_none()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .description
            .as_deref()
            .or(self.message.as_deref())
            .or(self.code.as_deref())
            .unwrap_or("no error details");
        f.write_str(summary)?;

        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Error returned when an HTTP request receives a non-successful response.
#[derive(Debug, Error)]
#[error("Freshservice API responded with status {code}: {error_response}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The decoded error payload.
    pub error_response: ErrorResponse,
}

/// Error returned when an HTTP request fails validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is not an absolute path.
    #[error("Request path '{path}' must start with '/' and must not carry a query string.")]
    InvalidPath {
        /// The path that was provided.
        path: String,
    },

    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with a {method} request.")]
    UnexpectedBody {
        /// The HTTP method of the request.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// A single attempt is made per request; none of these errors are retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A 2xx response whose body did not match the expected JSON shape.
    #[error("Failed to decode response body (status {code}): {source}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Network, DNS, timeout or connection error, passed through unmodified.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Decode { code, .. } => Some(*code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the decoded error payload of a non-2xx response.
    #[must_use]
    pub const fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Response(e) => Some(&e.error_response),
            _ => None,
        }
    }
}
