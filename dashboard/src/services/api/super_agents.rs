//! # Super-Agent Endpoints
//!
//! | Operation | Method | Endpoint | Params / body |
//! |---|---|---|---|
//! | [`list`] | GET | `super-agents` | `page`, `size` |
//! | [`get_by_uid`] | GET | `super-agents/{uid}` | |
//! | [`create`] | POST | `super-agents/create` | JSON [`NewSuperAgent`] |
//! | [`update_status`] | PUT | `super-agents/{uid}/update-status` | `status` |
//! | [`assign_sub_agent`] | POST | `super-agents/{uid}/assign` | `agentUid` |
//! | [`remove_sub_agent`] | POST | `super-agents/{uid}/remove` | `agentUid` |
//! | [`search`] | GET | `super-agents/search` | filters + `page`, `size` |
//! | [`get_by_partner`] | GET | `super-agents/partner/{partnerUid}` | `page`, `size` |
//! | [`get_sub_agents`] | GET | `super-agents/{uid}/sub-agents` | `page`, `size` |
//! | [`get_sub_agents_count`] | GET | `super-agents/{uid}/sub-agents/count` | |
//! | [`get_hierarchy`] | GET | `super-agents/{uid}/hierarchy` | |
//! | [`get_statistics`] | GET | `super-agents/statistics` | |
//!
//! Every function is one wrapper call; errors propagate unchanged.

use shared::{
    Agent, AgentHierarchy, AgentQuery, CountResponse, EntityStatistics, EntityStatus, NewSuperAgent,
    PageRequest, PaginatedResponse, SuperAgent,
};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "super-agents";
pub const BY_UID: &str = "super-agents/{uid}";
pub const CREATE: &str = "super-agents/create";
pub const UPDATE_STATUS: &str = "super-agents/{uid}/update-status";
pub const ASSIGN: &str = "super-agents/{uid}/assign";
pub const REMOVE: &str = "super-agents/{uid}/remove";
pub const SEARCH: &str = "super-agents/search";
pub const BY_PARTNER: &str = "super-agents/partner/{partnerUid}";
pub const SUB_AGENTS: &str = "super-agents/{uid}/sub-agents";
pub const SUB_AGENTS_COUNT: &str = "super-agents/{uid}/sub-agents/count";
pub const HIERARCHY: &str = "super-agents/{uid}/hierarchy";
pub const STATISTICS: &str = "super-agents/statistics";

/// One page of super-agents.
#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<SuperAgent>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

/// One super-agent.
pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<SuperAgent> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

/// Create a super-agent; the response carries the assigned `uid`.
#[tracing::instrument(skip(client, payload), fields(business_name = %payload.business_name))]
pub async fn create(client: &ApiClient, payload: &NewSuperAgent) -> Result<SuperAgent> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

/// Change a super-agent's status.
#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<SuperAgent> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

/// Link a sub-agent under a super-agent.
#[tracing::instrument(skip(client))]
pub async fn assign_sub_agent(client: &ApiClient, uid: &str, agent_uid: &str) -> Result<()> {
    let path = fill_template(ASSIGN, &[("uid", uid)])?;
    let params = QueryParams::new().with("agentUid", agent_uid);
    client.post_empty(&path, params.into()).await
}

/// Unlink a sub-agent from a super-agent.
#[tracing::instrument(skip(client))]
pub async fn remove_sub_agent(client: &ApiClient, uid: &str, agent_uid: &str) -> Result<()> {
    let path = fill_template(REMOVE, &[("uid", uid)])?;
    let params = QueryParams::new().with("agentUid", agent_uid);
    client.post_empty(&path, params.into()).await
}

/// Filtered page of super-agents.
#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &AgentQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<SuperAgent>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

/// Super-agents belonging to one partner.
pub async fn get_by_partner(
    client: &ApiClient,
    partner_uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<SuperAgent>> {
    let path = fill_template(BY_PARTNER, &[("partnerUid", partner_uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

/// Agents assigned under a super-agent.
pub async fn get_sub_agents(
    client: &ApiClient,
    uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<Agent>> {
    let path = fill_template(SUB_AGENTS, &[("uid", uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

/// Number of agents assigned under a super-agent.
pub async fn get_sub_agents_count(client: &ApiClient, uid: &str) -> Result<CountResponse> {
    let path = fill_template(SUB_AGENTS_COUNT, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

/// Tree of agents below a super-agent.
pub async fn get_hierarchy(client: &ApiClient, uid: &str) -> Result<AgentHierarchy> {
    let path = fill_template(HIERARCHY, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

/// Aggregate counts for the super-agents page.
pub async fn get_statistics(client: &ApiClient) -> Result<EntityStatistics> {
    client.get(STATISTICS, RequestOptions::new()).await
}
