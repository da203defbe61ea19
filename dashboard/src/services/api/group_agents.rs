//! Group-agent endpoints. A group bundles agents of one partner; membership is
//! managed with query parameters like super-agent linkage.

use shared::{
    Agent, AgentQuery, EntityStatus, GroupAgent, NewGroupAgent, PageRequest, PaginatedResponse,
};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "group-agents";
pub const BY_UID: &str = "group-agents/{uid}";
pub const CREATE: &str = "group-agents/create";
pub const UPDATE_STATUS: &str = "group-agents/{uid}/update-status";
pub const SEARCH: &str = "group-agents/search";
pub const BY_PARTNER: &str = "group-agents/partner/{partnerUid}";
pub const MEMBERS: &str = "group-agents/{uid}/members";
pub const ADD_MEMBER: &str = "group-agents/{uid}/add-member";
pub const REMOVE_MEMBER: &str = "group-agents/{uid}/remove-member";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<GroupAgent>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<GroupAgent> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(name = %payload.name))]
pub async fn create(client: &ApiClient, payload: &NewGroupAgent) -> Result<GroupAgent> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<GroupAgent> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

/// Groups whose name matches `query.business_name`.
#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &AgentQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<GroupAgent>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

pub async fn get_by_partner(
    client: &ApiClient,
    partner_uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<GroupAgent>> {
    let path = fill_template(BY_PARTNER, &[("partnerUid", partner_uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

pub async fn get_members(
    client: &ApiClient,
    uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<Agent>> {
    let path = fill_template(MEMBERS, &[("uid", uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

#[tracing::instrument(skip(client))]
pub async fn add_member(client: &ApiClient, uid: &str, agent_uid: &str) -> Result<()> {
    let path = fill_template(ADD_MEMBER, &[("uid", uid)])?;
    let params = QueryParams::new().with("agentUid", agent_uid);
    client.post_empty(&path, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn remove_member(client: &ApiClient, uid: &str, agent_uid: &str) -> Result<()> {
    let path = fill_template(REMOVE_MEMBER, &[("uid", uid)])?;
    let params = QueryParams::new().with("agentUid", agent_uid);
    client.post_empty(&path, params.into()).await
}
