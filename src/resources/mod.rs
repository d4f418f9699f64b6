//! Freshservice resource services.
//!
//! Each service borrows the shared [`HttpClient`](crate::clients::HttpClient)
//! and maps its methods one-to-one onto API endpoints:
//!
//! - [`TicketService`]: `/api/v2/tickets`
//! - [`RequesterService`]: `/api/v2/requesters`
//! - [`RequesterGroupService`]: `/api/v2/requester_groups`
//! - [`AgentService`]: `/api/v2/agents`
//!
//! List methods take an optional [`QueryFilter`](crate::filters::QueryFilter)
//! and return the page together with the cursor of the next page, if any.
//! Create and update validate their input before anything is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = None;
//! loop {
//!     let filter = RequesterGroupListFilter { page_query: cursor };
//!     let (groups, next) = client.requester_groups().list(Some(&filter)).await?;
//!     for group in groups {
//!         println!("{:?}", group.name);
//!     }
//!     match next {
//!         Some(next) => cursor = Some(next),
//!         None => break,
//!     }
//! }
//! ```

mod agent;
mod errors;
mod requester;
mod requester_group;
mod service;
mod ticket;

pub use agent::{
    Agent, AgentDetails, AgentListFilter, AgentRole, AgentService, AgentState, Agents,
    ASSIGNMENT_SCOPES,
};
pub use errors::{ResourceError, ValidationError};
pub use requester::{
    Requester, RequesterDetails, RequesterListFilter, RequesterService, Requesters, TIME_FORMATS,
};
pub use requester_group::{
    RequesterGroup, RequesterGroupDetails, RequesterGroupListFilter, RequesterGroupService,
    RequesterGroups, REQUESTER_GROUP_TYPES,
};
pub use ticket::{
    priority, status, PredefinedTicketFilter, SortOptions, Ticket, TicketContact, TicketDetails,
    TicketEmbedOptions, TicketFilter, TicketListOptions, TicketService, TicketStats, Tickets,
};
