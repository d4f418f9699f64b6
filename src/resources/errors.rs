//! Resource-specific error types for REST API operations.
//!
//! # Error Handling
//!
//! - [`ValidationError`]: A caller-supplied value is outside the values the
//!   API accepts. Detected locally; the request is never sent.
//! - [`ResourceError::Http`]: Transport, decode and API errors from the
//!   shared client, surfaced as-is.
//! - [`ResourceError::Encode`]: A request body could not be serialized.
//!
//! # Example
//!
//! ```rust,ignore
//! use freshservice::resources::{ResourceError, ValidationError};
//! use freshservice::clients::HttpError;
//!
//! match client.requester_groups().create(&group).await {
//!     Ok(created) => println!("Created group {:?}", created.id),
//!     Err(ResourceError::Validation(e)) => println!("Not sent: {e}"),
//!     Err(ResourceError::Http(HttpError::Response(e))) => {
//!         for (field, messages) in e.error_response.messages_by_field() {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError};

/// A client-side validation failure, raised before any request is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not one of the accepted choices.
    #[error("Invalid {field} '{value}'; choose from {}", .allowed.join(", "))]
    InvalidChoice {
        /// What was being validated (e.g. "requester group type").
        field: &'static str,
        /// The rejected value.
        value: String,
        /// The accepted values.
        allowed: &'static [&'static str],
    },

    /// The numeric value is outside the accepted range.
    #[error("Invalid {field} {value}; expected a value between {min} and {max}")]
    OutOfRange {
        /// What was being validated (e.g. "ticket priority").
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },
}

/// Checks an optional value against a fixed set of choices.
///
/// Unset values pass; the API applies its own default.
pub(crate) fn validate_choice(
    field: &'static str,
    value: Option<&str>,
    allowed: &'static [&'static str],
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !allowed.contains(&value) => Err(ValidationError::InvalidChoice {
            field,
            value: value.to_string(),
            allowed,
        }),
        _ => Ok(()),
    }
}

/// Checks an optional value against an inclusive range.
pub(crate) fn validate_range(
    field: &'static str,
    value: Option<u8>,
    min: u8,
    max: u8,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !(min..=max).contains(&value) => Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        }),
        _ => Ok(()),
    }
}

/// Error type for resource service operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Client-side validation rejected the input; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<InvalidHttpRequestError> for ResourceError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

impl ResourceError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            Self::Validation(_) | Self::Encode(_) => None,
        }
    }
}
