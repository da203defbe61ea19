//! # Resource Adapters
//!
//! [`RemoteResource`] implementations over the typed service modules, one per
//! listable resource. Each adapter scopes the service call to the collection's
//! cancellation token, lists when the query is empty and searches otherwise, and
//! maps a 404 on a detail fetch to `None`.

use async_trait::async_trait;
use shared::{
    Agent, AgentQuery, Booking, BookingQuery, BookingStatistics, Bus, BusQuery, EntityStatistics,
    GroupAgent, PageRequest, PaginatedResponse, Partner, PartnerQuery, Role, RoleQuery, SuperAgent,
    User, UserQuery,
};
use tokio_util::sync::CancellationToken;

use super::client::ApiClient;
use super::{agents, bookings, buses, group_agents, partners, roles, super_agents, users};
use crate::core::error::Result;
use crate::core::service::{not_found_as_none, RemoteResource};

/// Declares an adapter struct holding an [`ApiClient`].
macro_rules! adapter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            client: ApiClient,
        }

        impl $name {
            pub fn new(client: ApiClient) -> Self {
                Self { client }
            }
        }
    };
}

adapter!(
    /// Partners, with statistics.
    PartnerResource
);
adapter!(
    /// Agents, with statistics.
    AgentResource
);
adapter!(
    /// Super-agents, with statistics.
    SuperAgentResource
);
adapter!(
    /// Group-agents.
    GroupAgentResource
);
adapter!(
    /// Bookings, with booking statistics.
    BookingResource
);
adapter!(
    /// Buses.
    BusResource
);
adapter!(
    /// Dashboard users.
    UserResource
);
adapter!(
    /// Roles.
    RoleResource
);

#[async_trait]
impl RemoteResource for PartnerResource {
    type Item = Partner;
    type Query = PartnerQuery;
    type Stats = EntityStatistics;

    fn name(&self) -> &'static str {
        "partners"
    }

    async fn fetch_page(
        &self,
        query: &PartnerQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Partner>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            partners::list(&client, page).await
        } else {
            partners::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Partner>> {
        not_found_as_none(partners::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }

    async fn fetch_stats(&self, cancel: CancellationToken) -> Result<EntityStatistics> {
        partners::get_statistics(&self.client.with_cancel(cancel)).await
    }
}

#[async_trait]
impl RemoteResource for AgentResource {
    type Item = Agent;
    type Query = AgentQuery;
    type Stats = EntityStatistics;

    fn name(&self) -> &'static str {
        "agents"
    }

    async fn fetch_page(
        &self,
        query: &AgentQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Agent>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            agents::list(&client, page).await
        } else {
            agents::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Agent>> {
        not_found_as_none(agents::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }

    async fn fetch_stats(&self, cancel: CancellationToken) -> Result<EntityStatistics> {
        agents::get_statistics(&self.client.with_cancel(cancel)).await
    }
}

#[async_trait]
impl RemoteResource for SuperAgentResource {
    type Item = SuperAgent;
    type Query = AgentQuery;
    type Stats = EntityStatistics;

    fn name(&self) -> &'static str {
        "super-agents"
    }

    async fn fetch_page(
        &self,
        query: &AgentQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<SuperAgent>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            super_agents::list(&client, page).await
        } else {
            super_agents::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<SuperAgent>> {
        not_found_as_none(super_agents::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }

    async fn fetch_stats(&self, cancel: CancellationToken) -> Result<EntityStatistics> {
        super_agents::get_statistics(&self.client.with_cancel(cancel)).await
    }
}

#[async_trait]
impl RemoteResource for GroupAgentResource {
    type Item = GroupAgent;
    type Query = AgentQuery;
    type Stats = ();

    fn name(&self) -> &'static str {
        "group-agents"
    }

    async fn fetch_page(
        &self,
        query: &AgentQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<GroupAgent>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            group_agents::list(&client, page).await
        } else {
            group_agents::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<GroupAgent>> {
        not_found_as_none(group_agents::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }
}

#[async_trait]
impl RemoteResource for BookingResource {
    type Item = Booking;
    type Query = BookingQuery;
    type Stats = BookingStatistics;

    fn name(&self) -> &'static str {
        "bookings"
    }

    async fn fetch_page(
        &self,
        query: &BookingQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Booking>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            bookings::list(&client, page).await
        } else {
            bookings::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Booking>> {
        not_found_as_none(bookings::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }

    async fn fetch_stats(&self, cancel: CancellationToken) -> Result<BookingStatistics> {
        bookings::get_statistics(&self.client.with_cancel(cancel)).await
    }
}

#[async_trait]
impl RemoteResource for BusResource {
    type Item = Bus;
    type Query = BusQuery;
    type Stats = ();

    fn name(&self) -> &'static str {
        "buses"
    }

    async fn fetch_page(
        &self,
        query: &BusQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Bus>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            buses::list(&client, page).await
        } else {
            buses::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Bus>> {
        not_found_as_none(buses::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }
}

#[async_trait]
impl RemoteResource for UserResource {
    type Item = User;
    type Query = UserQuery;
    type Stats = ();

    fn name(&self) -> &'static str {
        "users"
    }

    async fn fetch_page(
        &self,
        query: &UserQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<User>> {
        let client = self.client.with_cancel(cancel);
        if query.is_empty() {
            users::list(&client, page).await
        } else {
            users::search(&client, query, page).await
        }
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<User>> {
        not_found_as_none(users::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }
}

#[async_trait]
impl RemoteResource for RoleResource {
    type Item = Role;
    type Query = RoleQuery;
    type Stats = ();

    fn name(&self) -> &'static str {
        "roles"
    }

    async fn fetch_page(
        &self,
        query: &RoleQuery,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Role>> {
        roles::list(&self.client.with_cancel(cancel), query, page).await
    }

    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Role>> {
        not_found_as_none(roles::get_by_uid(&self.client.with_cancel(cancel), uid).await)
    }
}
