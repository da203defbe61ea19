//! # Partner API
//!
//! The request wrapper ([`client::ApiClient`]), its parameter types, and one typed
//! service module per resource. Service functions are free `async fn`s taking
//! `&ApiClient`: each fills its endpoint template and issues exactly one call.
//!
//! ```rust,ignore
//! use dashboard::services::api::{super_agents, ApiClient};
//! use shared::PageRequest;
//!
//! let page = super_agents::list(&client, PageRequest::new(1, 20)?).await?;
//! let tree = super_agents::get_hierarchy(&client, &page.items[0].uid).await?;
//! ```

pub mod client;
pub mod endpoints;
pub mod params;
pub mod resources;

pub mod agents;
pub mod bookings;
pub mod buses;
pub mod group_agents;
pub mod partners;
pub mod roles;
pub mod settings;
pub mod super_agents;
pub mod users;

pub use client::{ApiClient, API_KEY_HEADER, API_SECRET_HEADER};
pub use params::{ParamValue, QueryParams, RequestOptions};
pub use resources::{
    AgentResource, BookingResource, BusResource, GroupAgentResource, PartnerResource,
    RoleResource, SuperAgentResource, UserResource,
};
