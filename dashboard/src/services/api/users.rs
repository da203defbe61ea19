//! Dashboard user endpoints.

use shared::{EntityStatus, NewUser, PageRequest, PaginatedResponse, UpdateUser, User, UserQuery};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "users";
pub const BY_UID: &str = "users/{uid}";
pub const CREATE: &str = "users/create";
pub const UPDATE: &str = "users/{uid}/update";
pub const UPDATE_STATUS: &str = "users/{uid}/update-status";
pub const SEARCH: &str = "users/search";
pub const DELETE: &str = "users/{uid}/delete";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<User>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<User> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(email = %payload.email))]
pub async fn create(client: &ApiClient, payload: &NewUser) -> Result<User> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, uid: &str, payload: &UpdateUser) -> Result<User> {
    let path = fill_template(UPDATE, &[("uid", uid)])?;
    client.put(&path, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, uid: &str, status: EntityStatus) -> Result<User> {
    let path = fill_template(UPDATE_STATUS, &[("uid", uid)])?;
    let params = QueryParams::new().with("status", status.as_str());
    client.put_empty(&path, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &UserQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<User>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, uid: &str) -> Result<()> {
    let path = fill_template(DELETE, &[("uid", uid)])?;
    client.delete(&path, RequestOptions::new()).await
}
