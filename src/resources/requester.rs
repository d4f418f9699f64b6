//! Requester resource: the end users who raise tickets.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ErrorResponse, FieldError, HttpClient, HttpMethod, HttpRequest};
use crate::filters::{QueryClauses, QueryFilter};
use crate::resources::errors::{validate_choice, ResourceError, ValidationError};
use crate::resources::service::{bare_request, body_request, fetch, fetch_page, list_request};

const REQUESTER_URL: &str = "/api/v2/requesters";

/// Accepted values for `time_format`.
pub const TIME_FORMATS: &[&str] = &["12h", "24h"];

/// A page of requesters, as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Requesters {
    #[serde(rename = "requesters", default)]
    pub list: Vec<RequesterDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// A single requester envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Requester {
    #[serde(rename = "requester", default)]
    pub details: RequesterDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// The fields of a Freshservice requester.
///
/// Only fields that are `Some` are sent on create and update. Server-managed
/// fields are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RequesterDetails {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_see_all_tickets_from_associated_departments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_manager_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// `12h` or `24h`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing)]
    pub active: Option<bool>,
    #[serde(skip_serializing)]
    pub has_logged_in: Option<bool>,
    #[serde(skip_serializing)]
    pub is_agent: Option<bool>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RequesterDetails {
    /// Checks the fields the API restricts to fixed values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidChoice`] when `time_format` is set to
    /// anything other than `12h` or `24h`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_choice("time format", self.time_format.as_deref(), TIME_FORMATS)
    }
}

/// Filter for listing requesters.
///
/// The API accepts one search criterion at a time, so only the first set field
/// is sent, in this order: `email`, `mobile_phone`, `work_phone`, `active`,
/// `include_agents`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequesterListFilter {
    /// Cursor returned by a previous list call.
    pub page_query: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub work_phone: Option<String>,
    pub active: Option<bool>,
    pub include_agents: Option<bool>,
}

impl QueryFilter for RequesterListFilter {
    fn query_string(&self) -> String {
        let mut clauses = QueryClauses::with_cursor(self.page_query.as_deref());

        if let Some(email) = &self.email {
            clauses.push("email", email);
        } else if let Some(mobile) = &self.mobile_phone {
            clauses.push("mobile_phone_number", mobile);
        } else if let Some(work) = &self.work_phone {
            clauses.push("work_phone_number", work);
        } else if let Some(active) = self.active {
            clauses.push("active", active);
        } else if let Some(include_agents) = self.include_agents {
            clauses.push("include_agents", include_agents);
        }

        clauses.finish()
    }
}

/// Operations on `/api/v2/requesters`.
///
/// # Example
///
/// ```rust,ignore
/// let filter = RequesterListFilter {
///     email: Some("jane@example.com".to_string()),
///     ..Default::default()
/// };
/// let (page, next) = client.requesters().list(Some(&filter)).await?;
/// for requester in &page.list {
///     println!("{:?}", requester.primary_email);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequesterService<'a> {
    client: &'a HttpClient,
}

impl<'a> RequesterService<'a> {
    /// Creates a service bound to `client`.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists requesters, returning the page and the cursor of the next page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn list(
        &self,
        filter: Option<&dyn QueryFilter>,
    ) -> Result<(Requesters, Option<String>), ResourceError> {
        let request = list_request(REQUESTER_URL, filter)?;
        fetch_page(self.client, request).await
    }

    /// Fetches a requester by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn get(&self, id: u64) -> Result<Requester, ResourceError> {
        let request = bare_request(HttpMethod::Get, format!("{REQUESTER_URL}/{id}"))?;
        fetch(self.client, request).await
    }

    /// Creates a requester.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn create(&self, details: &RequesterDetails) -> Result<Requester, ResourceError> {
        details.validate()?;
        let request = body_request(HttpMethod::Post, REQUESTER_URL, details)?;
        fetch(self.client, request).await
    }

    /// Updates a requester with the fields set in `details`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn update(
        &self,
        id: u64,
        details: &RequesterDetails,
    ) -> Result<Requester, ResourceError> {
        details.validate()?;
        let request = body_request(HttpMethod::Put, format!("{REQUESTER_URL}/{id}"), details)?;
        fetch(self.client, request).await
    }

    /// Permanently deletes a requester and their tickets.
    ///
    /// Returns whatever error payload the API attached to the response; on a
    /// `204 No Content` it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn delete(&self, id: u64) -> Result<ErrorResponse, ResourceError> {
        let request = bare_request(HttpMethod::Delete, format!("{REQUESTER_URL}/{id}/forget"))?;
        fetch(self.client, request).await
    }

    /// Deactivates a requester. The record is kept and can be reactivated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn deactivate(&self, id: u64) -> Result<Requester, ResourceError> {
        let request = bare_request(HttpMethod::Delete, format!("{REQUESTER_URL}/{id}"))?;
        fetch(self.client, request).await
    }

    /// Reactivates a deactivated requester.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn reactivate(&self, id: u64) -> Result<Requester, ResourceError> {
        let request = bare_request(HttpMethod::Put, format!("{REQUESTER_URL}/{id}/reactivate"))?;
        fetch(self.client, request).await
    }

    /// Converts a requester into an occasional agent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn convert_to_agent(&self, id: u64) -> Result<Requester, ResourceError> {
        let request = bare_request(
            HttpMethod::Put,
            format!("{REQUESTER_URL}/{id}/convert_to_agent"),
        )?;
        fetch(self.client, request).await
    }

    /// Merges the `secondary` requesters into the primary requester `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn merge_requesters(
        &self,
        id: u64,
        secondary: &[u64],
    ) -> Result<Requester, ResourceError> {
        let mut builder = HttpRequest::builder(HttpMethod::Put, format!("{REQUESTER_URL}/{id}/merge"));
        for secondary_id in secondary {
            builder = builder.query_param("secondary_requesters", secondary_id);
        }
        fetch(self.client, builder.build()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requester_deserializes_wire_keys() {
        let body = json!({
            "requester": {
                "id": 42,
                "first_name": "Jane",
                "primary_email": "jane@example.com",
                "department_ids": [7, 9],
                "reporting_manager_id": null,
                "time_format": "12h",
                "custom_fields": {"house": "Gryffindor"},
                "active": true,
                "created_at": "2024-03-01T10:00:00Z"
            }
        });

        let requester: Requester = serde_json::from_value(body).unwrap();
        assert_eq!(requester.details.id, Some(42));
        assert_eq!(requester.details.primary_email.as_deref(), Some("jane@example.com"));
        assert_eq!(requester.details.department_ids, Some(vec![7, 9]));
        assert_eq!(requester.details.reporting_manager_id, None);
        assert_eq!(
            requester.details.custom_fields.unwrap()["house"],
            json!("Gryffindor")
        );
        assert!(requester.errors.is_empty());
    }

    #[test]
    fn test_serialization_omits_unset_and_read_only_fields() {
        let details = RequesterDetails {
            id: Some(42),
            first_name: Some("Jane".into()),
            active: Some(true),
            ..Default::default()
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value, json!({"first_name": "Jane"}));
    }

    #[test]
    fn test_validate_time_format() {
        let mut details = RequesterDetails::default();
        assert!(details.validate().is_ok());

        details.time_format = Some("24h".into());
        assert!(details.validate().is_ok());

        details.time_format = Some("ampm".into());
        let error = details.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid time format 'ampm'; choose from 12h, 24h"
        );
    }

    #[test]
    fn test_filter_emits_only_first_set_criterion() {
        let filter = RequesterListFilter {
            email: Some("jane@example.com".into()),
            mobile_phone: Some("555".into()),
            active: Some(true),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "email=jane%40example.com");

        let filter = RequesterListFilter {
            work_phone: Some("+1 555 0100".into()),
            include_agents: Some(true),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "work_phone_number=%2B1%20555%200100");

        let filter = RequesterListFilter {
            include_agents: Some(true),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "include_agents=true");
    }

    #[test]
    fn test_filter_can_list_inactive_requesters() {
        let filter = RequesterListFilter {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "active=false");
    }

    #[test]
    fn test_filter_cursor_comes_first() {
        let filter = RequesterListFilter {
            page_query: Some("page=3".into()),
            mobile_phone: Some("5550100".into()),
            ..Default::default()
        };
        let query = filter.query_string();
        assert_eq!(query, "page=3&mobile_phone_number=5550100");
        assert_eq!(query.split('&').next(), Some("page=3"));
    }

    #[test]
    fn test_empty_filter_yields_empty_query() {
        assert_eq!(RequesterListFilter::default().query_string(), "");
    }
}
