//! Partner endpoints.

use shared::{
    EntityStatistics, EntityStatus, NewPartner, PageRequest, PaginatedResponse, Partner,
    PartnerQuery, UpdatePartner,
};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "partners";
pub const BY_UID: &str = "partners/{uid}";
pub const CREATE: &str = "partners/create";
pub const UPDATE: &str = "partners/{uid}/update";
pub const UPDATE_STATUS: &str = "partners/{uid}/update-status";
pub const SEARCH: &str = "partners/search";
pub const DELETE: &str = "partners/{uid}/delete";
pub const STATISTICS: &str = "partners/statistics";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<Partner>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<Partner> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(business_name = %payload.business_name))]
pub async fn create(client: &ApiClient, payload: &NewPartner) -> Result<Partner> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, uid: &str, payload: &UpdatePartner) -> Result<Partner> {
    let path = fill_template(UPDATE, &[("uid", uid)])?;
    client.put(&path, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<Partner> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

/// Filtered page; filters are merged with `page`/`size`.
#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &PartnerQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<Partner>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, uid: &str) -> Result<()> {
    let path = fill_template(DELETE, &[("uid", uid)])?;
    client.delete(&path, RequestOptions::new()).await
}

pub async fn get_statistics(client: &ApiClient) -> Result<EntityStatistics> {
    client.get(STATISTICS, RequestOptions::new()).await
}
