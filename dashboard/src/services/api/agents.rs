//! Agent endpoints. Super-agents and group-agents have their own modules.

use shared::{
    Agent, AgentQuery, EntityStatistics, EntityStatus, NewAgent, PageRequest, PaginatedResponse,
    UpdateAgent,
};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "agents";
pub const BY_UID: &str = "agents/{uid}";
pub const CREATE: &str = "agents/create";
pub const UPDATE: &str = "agents/{uid}/update";
pub const UPDATE_STATUS: &str = "agents/{uid}/update-status";
pub const SEARCH: &str = "agents/search";
pub const BY_PARTNER: &str = "agents/partner/{partnerUid}";
pub const STATISTICS: &str = "agents/statistics";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<Agent>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<Agent> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(business_name = %payload.business_name))]
pub async fn create(client: &ApiClient, payload: &NewAgent) -> Result<Agent> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, uid: &str, payload: &UpdateAgent) -> Result<Agent> {
    let path = fill_template(UPDATE, &[("uid", uid)])?;
    client.put(&path, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<Agent> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &AgentQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<Agent>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

pub async fn get_by_partner(
    client: &ApiClient,
    partner_uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<Agent>> {
    let path = fill_template(BY_PARTNER, &[("partnerUid", partner_uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

pub async fn get_statistics(client: &ApiClient) -> Result<EntityStatistics> {
    client.get(STATISTICS, RequestOptions::new()).await
}
