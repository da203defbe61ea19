//! Company-wide settings: a single document, no pagination.

use shared::Settings;

use super::client::ApiClient;
use super::params::RequestOptions;
use crate::core::error::Result;

pub const GET: &str = "settings";
pub const UPDATE: &str = "settings/update";

pub async fn get(client: &ApiClient) -> Result<Settings> {
    client.get(GET, RequestOptions::new()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn update(client: &ApiClient, payload: &Settings) -> Result<Settings> {
    client.put(UPDATE, payload, RequestOptions::new()).await
}
