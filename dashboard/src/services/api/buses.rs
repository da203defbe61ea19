//! Bus fleet endpoints.

use shared::{Bus, BusQuery, EntityStatus, NewBus, PageRequest, PaginatedResponse, UpdateBus};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "buses";
pub const BY_UID: &str = "buses/{uid}";
pub const CREATE: &str = "buses/create";
pub const UPDATE: &str = "buses/{uid}/update";
pub const UPDATE_STATUS: &str = "buses/{uid}/update-status";
pub const SEARCH: &str = "buses/search";
pub const DELETE: &str = "buses/{uid}/delete";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<Bus>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<Bus> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(plate_number = %payload.plate_number))]
pub async fn create(client: &ApiClient, payload: &NewBus) -> Result<Bus> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, uid: &str, payload: &UpdateBus) -> Result<Bus> {
    let path = fill_template(UPDATE, &[("uid", uid)])?;
    client.put(&path, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<Bus> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &BusQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<Bus>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, uid: &str) -> Result<()> {
    let path = fill_template(DELETE, &[("uid", uid)])?;
    client.delete(&path, RequestOptions::new()).await
}
