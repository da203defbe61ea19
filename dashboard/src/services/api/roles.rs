//! Role and permission endpoints.

use shared::{PageRequest, PaginatedResponse, Permission, Role, RoleInput, RoleQuery};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "roles";
pub const BY_UID: &str = "roles/{uid}";
pub const CREATE: &str = "roles/create";
pub const UPDATE: &str = "roles/{uid}/update";
pub const DELETE: &str = "roles/{uid}/delete";
pub const PERMISSIONS: &str = "roles/permissions";
pub const ASSIGN: &str = "roles/{uid}/assign";

/// Roles are few, so filtering rides on the list endpoint.
#[tracing::instrument(skip(client))]
pub async fn list(
    client: &ApiClient,
    query: &RoleQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<Role>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(LIST, params.into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<Role> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload), fields(name = %payload.name))]
pub async fn create(client: &ApiClient, payload: &RoleInput) -> Result<Role> {
    client.post(CREATE, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, uid: &str, payload: &RoleInput) -> Result<Role> {
    let path = fill_template(UPDATE, &[("uid", uid)])?;
    client.put(&path, payload, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn delete(client: &ApiClient, uid: &str) -> Result<()> {
    let path = fill_template(DELETE, &[("uid", uid)])?;
    client.delete(&path, RequestOptions::new()).await
}

/// Every permission code a role can grant.
pub async fn list_permissions(client: &ApiClient) -> Result<Vec<Permission>> {
    client.get(PERMISSIONS, RequestOptions::new()).await
}

#[tracing::instrument(skip(client))]
pub async fn assign_to_user(client: &ApiClient, uid: &str, user_uid: &str) -> Result<()> {
    let path = fill_template(ASSIGN, &[("uid", uid)])?;
    let params = QueryParams::new().with("userUid", user_uid);
    client.post_empty(&path, params.into()).await
}
