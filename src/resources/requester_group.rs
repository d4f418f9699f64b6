//! Requester group resource.

use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpMethod};
use crate::filters::{QueryClauses, QueryFilter};
use crate::resources::errors::{validate_choice, ResourceError, ValidationError};
use crate::resources::requester::Requesters;
use crate::resources::service::{
    bare_request, body_request, execute, fetch, fetch_page, list_request,
};

const REQUESTER_GROUP_URL: &str = "/api/v2/requester_groups";

/// Accepted values for a requester group's `type`.
pub const REQUESTER_GROUP_TYPES: &[&str] = &["manual", "rule_based"];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RequesterGroups {
    #[serde(rename = "requester_groups", default)]
    pub list: Vec<RequesterGroupDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RequesterGroup {
    #[serde(rename = "requester_group", default)]
    pub details: RequesterGroupDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RequesterGroupDetails {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `manual` or `rule_based`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl RequesterGroupDetails {
    /// Checks the group type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidChoice`] when the group type is set to
    /// anything other than `manual` or `rule_based`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_choice(
            "requester group type",
            self.group_type.as_deref(),
            REQUESTER_GROUP_TYPES,
        )
    }
}

/// Filter for listing requester groups. Only pagination is supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequesterGroupListFilter {
    pub page_query: Option<String>,
}

impl QueryFilter for RequesterGroupListFilter {
    fn query_string(&self) -> String {
        QueryClauses::with_cursor(self.page_query.as_deref()).finish()
    }
}

/// Operations on `/api/v2/requester_groups`.
#[derive(Debug, Clone, Copy)]
pub struct RequesterGroupService<'a> {
    client: &'a HttpClient,
}

impl<'a> RequesterGroupService<'a> {
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists requester groups, returning the page and the next-page cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn list(
        &self,
        filter: Option<&dyn QueryFilter>,
    ) -> Result<(Vec<RequesterGroupDetails>, Option<String>), ResourceError> {
        let request = list_request(REQUESTER_GROUP_URL, filter)?;
        let (groups, cursor): (RequesterGroups, Option<String>) =
            fetch_page(self.client, request).await?;
        Ok((groups.list, cursor))
    }

    /// Fetches a requester group by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn get(&self, id: u64) -> Result<RequesterGroupDetails, ResourceError> {
        let request = bare_request(HttpMethod::Get, format!("{REQUESTER_GROUP_URL}/{id}"))?;
        let group: RequesterGroup = fetch(self.client, request).await?;
        Ok(group.details)
    }

    /// Creates a requester group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn create(
        &self,
        details: &RequesterGroupDetails,
    ) -> Result<RequesterGroupDetails, ResourceError> {
        details.validate()?;
        let request = body_request(HttpMethod::Post, REQUESTER_GROUP_URL, details)?;
        let group: RequesterGroup = fetch(self.client, request).await?;
        Ok(group.details)
    }

    /// Updates a requester group with the fields set in `details`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn update(
        &self,
        id: u64,
        details: &RequesterGroupDetails,
    ) -> Result<RequesterGroupDetails, ResourceError> {
        details.validate()?;
        let request = body_request(
            HttpMethod::Put,
            format!("{REQUESTER_GROUP_URL}/{id}"),
            details,
        )?;
        let group: RequesterGroup = fetch(self.client, request).await?;
        Ok(group.details)
    }

    /// Deletes a requester group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn delete(&self, id: u64) -> Result<(), ResourceError> {
        let request = bare_request(HttpMethod::Delete, format!("{REQUESTER_GROUP_URL}/{id}"))?;
        execute(self.client, request).await
    }

    /// Adds a requester to a manual requester group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn add_requester_to_group(
        &self,
        group_id: u64,
        requester_id: u64,
    ) -> Result<(), ResourceError> {
        let request = bare_request(
            HttpMethod::Post,
            format!("{REQUESTER_GROUP_URL}/{group_id}/members/{requester_id}"),
        )?;
        execute(self.client, request).await
    }

    /// Removes a requester from a manual requester group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn delete_requester_from_group(
        &self,
        group_id: u64,
        requester_id: u64,
    ) -> Result<(), ResourceError> {
        let request = bare_request(
            HttpMethod::Delete,
            format!("{REQUESTER_GROUP_URL}/{group_id}/members/{requester_id}"),
        )?;
        execute(self.client, request).await
    }

    /// Lists the members of a requester group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn list_members(
        &self,
        group_id: u64,
        filter: Option<&dyn QueryFilter>,
    ) -> Result<(Requesters, Option<String>), ResourceError> {
        let request = list_request(format!("{REQUESTER_GROUP_URL}/{group_id}/members"), filter)?;
        fetch_page(self.client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_rejects_unknown_type() {
        let details = RequesterGroupDetails {
            group_type: Some("invalid".into()),
            ..Default::default()
        };

        let error = details.validate().unwrap_err();
        assert!(error.to_string().contains("manual, rule_based"));
    }

    #[test]
    fn test_validate_accepts_known_types() {
        for group_type in ["manual", "rule_based"] {
            let details = RequesterGroupDetails {
                group_type: Some(group_type.into()),
                ..Default::default()
            };
            assert!(details.validate().is_ok(), "{group_type} should be valid");
        }
    }

    #[test]
    fn test_type_field_uses_wire_name() {
        let details = RequesterGroupDetails {
            id: Some(3),
            name: Some("VIPs".into()),
            group_type: Some("manual".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({"name": "VIPs", "type": "manual"})
        );

        let group: RequesterGroup = serde_json::from_value(json!({
            "requester_group": {"id": 3, "name": "VIPs", "description": null, "type": "rule_based"}
        }))
        .unwrap();
        assert_eq!(group.details.id, Some(3));
        assert_eq!(group.details.group_type.as_deref(), Some("rule_based"));
    }

    #[test]
    fn test_filter_is_cursor_only() {
        let filter = RequesterGroupListFilter {
            page_query: Some("page=2&per_page=50".into()),
        };
        assert_eq!(filter.query_string(), "page=2&per_page=50");
        assert_eq!(RequesterGroupListFilter::default().query_string(), "");
    }
}
