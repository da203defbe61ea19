//! Booking endpoints. Bookings are created by agents elsewhere; the dashboard
//! only reads them and can cancel one.

use shared::{
    Booking, BookingQuery, BookingStatistics, CancelBooking, PageRequest, PaginatedResponse,
};

use super::client::ApiClient;
use super::endpoints::fill_template;
use super::params::{QueryParams, RequestOptions};
use crate::core::error::Result;

pub const LIST: &str = "bookings";
pub const BY_UID: &str = "bookings/{uid}";
pub const SEARCH: &str = "bookings/search";
pub const BY_AGENT: &str = "bookings/agent/{agentUid}";
pub const CANCEL: &str = "bookings/{uid}/cancel";
pub const STATISTICS: &str = "bookings/statistics";

#[tracing::instrument(skip(client))]
pub async fn list(client: &ApiClient, page: PageRequest) -> Result<PaginatedResponse<Booking>> {
    client.get(LIST, QueryParams::page(page).into()).await
}

pub async fn get_by_uid(client: &ApiClient, uid: &str) -> Result<Booking> {
    let path = fill_template(BY_UID, &[("uid", uid)])?;
    client.get(&path, RequestOptions::new()).await
}

/// Filtered page; dates are sent as `YYYY-MM-DD`.
#[tracing::instrument(skip(client))]
pub async fn search(
    client: &ApiClient,
    query: &BookingQuery,
    page: PageRequest,
) -> Result<PaginatedResponse<Booking>> {
    let params = QueryParams::page(page).merge(QueryParams::from_serialize(query)?);
    client.get(SEARCH, params.into()).await
}

pub async fn get_by_agent(
    client: &ApiClient,
    agent_uid: &str,
    page: PageRequest,
) -> Result<PaginatedResponse<Booking>> {
    let path = fill_template(BY_AGENT, &[("agentUid", agent_uid)])?;
    client.get(&path, QueryParams::page(page).into()).await
}

#[tracing::instrument(skip(client, payload))]
pub async fn cancel(client: &ApiClient, uid: &str, payload: &CancelBooking) -> Result<Booking> {
    let path = fill_template(CANCEL, &[("uid", uid)])?;
    client.post(&path, payload, RequestOptions::new()).await
}

pub async fn get_statistics(client: &ApiClient) -> Result<BookingStatistics> {
    client.get(STATISTICS, RequestOptions::new()).await
}
