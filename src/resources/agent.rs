//! Agent resource: the helpdesk staff who work tickets.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpMethod, HttpRequest};
use crate::filters::{QueryClauses, QueryFilter};
use crate::resources::errors::{validate_choice, ResourceError, ValidationError};
use crate::resources::requester::TIME_FORMATS;
use crate::resources::service::{
    bare_request, body_request, execute, fetch, fetch_page, list_request,
};

const AGENT_URL: &str = "/api/v2/agents";

/// Accepted values for a role's `assignment_scope`.
pub const ASSIGNMENT_SCOPES: &[&str] = &[
    "entire_helpdesk",
    "member_groups",
    "specified_groups",
    "assigned_items",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Agents {
    #[serde(rename = "agents", default)]
    pub list: Vec<AgentDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Agent {
    #[serde(rename = "agent", default)]
    pub details: AgentDetails,
}

/// A role held by an agent and the scope it applies to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AgentRole {
    pub role_id: u64,
    pub assignment_scope: String,
    /// Group ids, for the `specified_groups` scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AgentDetails {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Occasional agents consume day passes instead of a full-time seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoreboard_level_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_of: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer_of: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<AgentRole>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing)]
    pub active: Option<bool>,
    #[serde(skip_serializing)]
    pub has_logged_in: Option<bool>,
    #[serde(skip_serializing)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AgentDetails {
    /// Checks the time format and every role's assignment scope.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidChoice`] for the first invalid value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_choice("time format", self.time_format.as_deref(), TIME_FORMATS)?;
        for role in self.roles.iter().flatten() {
            validate_choice(
                "role assignment scope",
                Some(role.assignment_scope.as_str()),
                ASSIGNMENT_SCOPES,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Fulltime,
    Occasional,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fulltime => "fulltime",
            Self::Occasional => "occasional",
        })
    }
}

/// Filter for listing agents.
///
/// Like requesters, only the first set criterion is sent, in the order
/// `email`, `mobile_phone`, `work_phone`, `active`, `state`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentListFilter {
    pub page_query: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub work_phone: Option<String>,
    pub active: Option<bool>,
    pub state: Option<AgentState>,
}

impl QueryFilter for AgentListFilter {
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
        } else if let Some(state) = self.state {
            clauses.push("state", state);
        }

        clauses.finish()
    }
}

/// Operations on `/api/v2/agents`.
#[derive(Debug, Clone, Copy)]
pub struct AgentService<'a> {
    client: &'a HttpClient,
}

impl<'a> AgentService<'a> {
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists agents, returning the page and the next-page cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn list(
        &self,
        filter: Option<&dyn QueryFilter>,
    ) -> Result<(Vec<AgentDetails>, Option<String>), ResourceError> {
        let request = list_request(AGENT_URL, filter)?;
        let (agents, cursor): (Agents, Option<String>) = fetch_page(self.client, request).await?;
        Ok((agents.list, cursor))
    }

    /// Fetches an agent by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn get(&self, id: u64) -> Result<AgentDetails, ResourceError> {
        self.agent(bare_request(HttpMethod::Get, format!("{AGENT_URL}/{id}"))?)
            .await
    }

    /// Creates an agent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn create(&self, details: &AgentDetails) -> Result<AgentDetails, ResourceError> {
        details.validate()?;
        self.agent(body_request(HttpMethod::Post, AGENT_URL, details)?)
            .await
    }

    /// Updates an agent with the fields set in `details`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn update(
        &self,
        id: u64,
        details: &AgentDetails,
    ) -> Result<AgentDetails, ResourceError> {
        details.validate()?;
        self.agent(body_request(HttpMethod::Put, format!("{AGENT_URL}/{id}"), details)?)
            .await
    }

    /// Deactivates an agent, freeing their seat.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn deactivate(&self, id: u64) -> Result<AgentDetails, ResourceError> {
        self.agent(bare_request(HttpMethod::Delete, format!("{AGENT_URL}/{id}"))?)
            .await
    }

    /// Permanently deletes an agent and the tickets they requested.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn delete(&self, id: u64) -> Result<(), ResourceError> {
        let request = bare_request(HttpMethod::Delete, format!("{AGENT_URL}/{id}/forget"))?;
        execute(self.client, request).await
    }

    /// Reactivates a deactivated agent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn reactivate(&self, id: u64) -> Result<AgentDetails, ResourceError> {
        self.agent(bare_request(HttpMethod::Put, format!("{AGENT_URL}/{id}/reactivate"))?)
            .await
    }

    /// Converts an agent into a requester.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn convert_to_requester(&self, id: u64) -> Result<AgentDetails, ResourceError> {
        self.agent(bare_request(
            HttpMethod::Put,
            format!("{AGENT_URL}/{id}/convert_to_requester"),
        )?)
        .await
    }

    async fn agent(&self, request: HttpRequest) -> Result<AgentDetails, ResourceError> {
        let agent: Agent = fetch(self.client, request).await?;
        Ok(agent.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_priority_order() {
        let filter = AgentListFilter {
            active: Some(true),
            state: Some(AgentState::Occasional),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "active=true");

        let filter = AgentListFilter {
            page_query: Some("page=2".into()),
            state: Some(AgentState::Fulltime),
            ..Default::default()
        };
        assert_eq!(filter.query_string(), "page=2&state=fulltime");
    }

    #[test]
    fn test_validate_role_scope() {
        let mut details = AgentDetails {
            roles: Some(vec![AgentRole {
                role_id: 5,
                assignment_scope: "member_groups".into(),
                groups: None,
            }]),
            ..Default::default()
        };
        assert!(details.validate().is_ok());

        details.roles = Some(vec![AgentRole {
            role_id: 5,
            assignment_scope: "everything".into(),
            groups: None,
        }]);
        let error = details.validate().unwrap_err();
        assert!(error.to_string().contains("entire_helpdesk, member_groups"));
    }

    #[test]
    fn test_validate_time_format() {
        let details = AgentDetails {
            time_format: Some("25h".into()),
            ..Default::default()
        };
        assert!(details.validate().is_err());
    }

    #[test]
    fn test_agent_deserializes_roles() {
        let agent: Agent = serde_json::from_value(json!({
            "agent": {
                "id": 9,
                "email": "ops@example.com",
                "occasional": false,
                "roles": [{"role_id": 1, "assignment_scope": "specified_groups", "groups": [4]}],
                "last_login_at": null
            }
        }))
        .unwrap();

        assert_eq!(agent.details.id, Some(9));
        let roles = agent.details.roles.unwrap();
        assert_eq!(roles[0].groups, Some(vec![4]));
    }
}
