//! Ticket resource.
//!
//! Ticket listing is the most flexible of the list endpoints: predefined
//! filters, requester and date criteria, sorting and embedded associations can
//! all be combined in one [`TicketListOptions`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpMethod};
use crate::filters::{QueryClauses, QueryFilter};
use crate::resources::errors::{validate_range, ResourceError, ValidationError};
use crate::resources::service::{
    bare_request, body_request, execute, fetch, fetch_page, list_request,
};

const TICKET_URL: &str = "/api/v2/tickets";

/// Built-in ticket status codes. Accounts may define custom statuses with
/// higher codes.
pub mod status {
    pub const OPEN: u8 = 2;
    pub const PENDING: u8 = 3;
    pub const RESOLVED: u8 = 4;
    pub const CLOSED: u8 = 5;
}

/// Ticket priority codes.
pub mod priority {
    pub const LOW: u8 = 1;
    pub const MEDIUM: u8 = 2;
    pub const HIGH: u8 = 3;
    pub const URGENT: u8 = 4;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Tickets {
    #[serde(rename = "tickets", default)]
    pub list: Vec<TicketDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Ticket {
    #[serde(rename = "ticket", default)]
    pub details: TicketDetails,
}

/// Timing statistics, embedded with `include=stats`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TicketStats {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
    pub pending_since: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub first_assigned_at: Option<DateTime<Utc>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub first_responded_at: Option<DateTime<Utc>>,
    pub agent_responded_at: Option<DateTime<Utc>>,
    pub requester_responded_at: Option<DateTime<Utc>>,
    pub status_updated_at: Option<DateTime<Utc>>,
}

/// A requester embedded with `include=requester` or `include=requested_for`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TicketContact {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
}

/// The fields of a Freshservice ticket.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TicketDetails {
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML content of the ticket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub description_text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    /// One of the [`status`] codes or a custom status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    /// One of the [`priority`] codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_for_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_emails: Option<Vec<String>>,
    #[serde(skip_serializing)]
    pub fwd_emails: Option<Vec<String>>,
    #[serde(skip_serializing)]
    pub reply_cc_emails: Option<Vec<String>>,
    #[serde(skip_serializing)]
    pub to_emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr_due_by: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub is_escalated: Option<bool>,
    #[serde(skip_serializing)]
    pub fr_escalated: Option<bool>,
    #[serde(skip_serializing)]
    pub spam: Option<bool>,
    #[serde(skip_serializing)]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing)]
    pub stats: Option<TicketStats>,
    #[serde(skip_serializing)]
    pub requester: Option<TicketContact>,
    #[serde(skip_serializing)]
    pub requested_for: Option<TicketContact>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TicketDetails {
    /// Checks priority, urgency and impact against their fixed scales.
    ///
    /// Status is not checked, since accounts can add custom statuses.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for a priority outside 1-4, or
    /// an urgency or impact outside 1-3.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range("ticket priority", self.priority, priority::LOW, priority::URGENT)?;
        validate_range("ticket urgency", self.urgency, 1, 3)?;
        validate_range("ticket impact", self.impact, 1, 3)
    }
}

/// Built-in ticket views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedTicketFilter {
    NewAndMyOpen,
    Watching,
    Spam,
    Deleted,
}

impl PredefinedTicketFilter {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NewAndMyOpen => "new_and_my_open",
            Self::Watching => "watching",
            Self::Spam => "spam",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for PredefinedTicketFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search criteria for ticket listing.
///
/// `requester_id` takes precedence over `requester_email` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub predefined: Option<PredefinedTicketFilter>,
    pub requester_id: Option<u64>,
    pub requester_email: Option<String>,
    pub updated_since: Option<DateTime<Utc>>,
    pub ticket_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub descending: bool,
    /// Field to order by, e.g. `created_at`. API default when unset.
    pub order_by: Option<String>,
}

/// Associations to embed in each listed ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketEmbedOptions {
    pub stats: bool,
    pub requester: bool,
    pub requested_for: bool,
}

impl TicketEmbedOptions {
    fn include_clause(self) -> Option<String> {
        let names: Vec<&str> = [
            (self.stats, "stats"),
            (self.requester, "requester"),
            (self.requested_for, "requested_for"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();

        (!names.is_empty()).then(|| format!("include={}", names.join(",")))
    }
}

/// List options for tickets; every set part is combined into the query.
///
/// # Example
///
/// ```rust
/// use freshservice::filters::QueryFilter;
/// use freshservice::resources::{SortOptions, TicketFilter, TicketListOptions};
///
/// let options = TicketListOptions {
///     filter_by: Some(TicketFilter {
///         requester_email: Some("jane@example.com".to_string()),
///         ..Default::default()
///     }),
///     sort_by: Some(SortOptions { descending: true, order_by: None }),
///     ..Default::default()
/// };
/// assert_eq!(options.query_string(), "email=jane%40example.com&order_type=desc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketListOptions {
    pub page_query: Option<String>,
    pub filter_by: Option<TicketFilter>,
    pub sort_by: Option<SortOptions>,
    pub embed: Option<TicketEmbedOptions>,
}

impl QueryFilter for TicketListOptions {
    fn query_string(&self) -> String {
        let mut clauses = QueryClauses::with_cursor(self.page_query.as_deref());

        if let Some(filter) = &self.filter_by {
            if let Some(predefined) = filter.predefined {
                clauses.push_raw(format!("filter={predefined}"));
            }
            if let Some(requester_id) = filter.requester_id {
                clauses.push("requester_id", requester_id);
            } else if let Some(email) = &filter.requester_email {
                clauses.push("email", email);
            }
            if let Some(since) = filter.updated_since {
                clauses.push(
                    "updated_since",
                    since.to_rfc3339_opts(SecondsFormat::Secs, true),
                );
            }
            if let Some(ticket_type) = &filter.ticket_type {
                clauses.push("type", ticket_type);
            }
        }

        if let Some(sort) = &self.sort_by {
            clauses.push_raw(if sort.descending {
                "order_type=desc"
            } else {
                "order_type=asc"
            });
            if let Some(order_by) = &sort.order_by {
                clauses.push("order_by", order_by);
            }
        }

        if let Some(include) = self.embed.and_then(TicketEmbedOptions::include_clause) {
            clauses.push_raw(include);
        }

        clauses.finish()
    }
}

/// Operations on `/api/v2/tickets`.
#[derive(Debug, Clone, Copy)]
pub struct TicketService<'a> {
    client: &'a HttpClient,
}

impl<'a> TicketService<'a> {
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists tickets, returning the page and the next-page cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn list(
        &self,
        filter: Option<&dyn QueryFilter>,
    ) -> Result<(Vec<TicketDetails>, Option<String>), ResourceError> {
        let request = list_request(TICKET_URL, filter)?;
        let (tickets, cursor): (Tickets, Option<String>) =
            fetch_page(self.client, request).await?;
        Ok((tickets.list, cursor))
    }

    /// Fetches a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport, API or decode errors.
    pub async fn get(&self, id: u64) -> Result<TicketDetails, ResourceError> {
        let request = bare_request(HttpMethod::Get, format!("{TICKET_URL}/{id}"))?;
        let ticket: Ticket = fetch(self.client, request).await?;
        Ok(ticket.details)
    }

    /// Creates a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn create(&self, details: &TicketDetails) -> Result<TicketDetails, ResourceError> {
        details.validate()?;
        let request = body_request(HttpMethod::Post, TICKET_URL, details)?;
        let ticket: Ticket = fetch(self.client, request).await?;
        Ok(ticket.details)
    }

    /// Updates a ticket with the fields set in `details`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] without sending anything if
    /// `details` is invalid, otherwise any HTTP error.
    pub async fn update(
        &self,
        id: u64,
        details: &TicketDetails,
    ) -> Result<TicketDetails, ResourceError> {
        details.validate()?;
        let request = body_request(HttpMethod::Put, format!("{TICKET_URL}/{id}"), details)?;
        let ticket: Ticket = fetch(self.client, request).await?;
        Ok(ticket.details)
    }

    /// Moves a ticket to trash. See [`restore`](Self::restore).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn delete(&self, id: u64) -> Result<(), ResourceError> {
        let request = bare_request(HttpMethod::Delete, format!("{TICKET_URL}/{id}"))?;
        execute(self.client, request).await
    }

    /// Restores a deleted ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] on transport or API errors.
    pub async fn restore(&self, id: u64) -> Result<(), ResourceError> {
        let request = bare_request(HttpMethod::Put, format!("{TICKET_URL}/{id}/restore"))?;
        execute(self.client, request).await
    }
}
