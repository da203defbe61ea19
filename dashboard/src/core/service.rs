//! # Service Traits
//!
//! The seam between remote collections and the typed service modules. A
//! [`RemoteResource`] knows how to fetch one page, one item and (optionally) the
//! statistics of a resource; [`crate::state::RemoteCollection`] owns everything else
//! (sequencing, cancellation, debounce, error state).
//!
//! Production implementations live in [`crate::services::api::resources`]; tests
//! provide scripted fakes.

use async_trait::async_trait;
use shared::{PageRequest, PaginatedResponse};
use tokio_util::sync::CancellationToken;

use super::error::{AppError, Result};

/// Search filter of a resource.
pub trait SearchQuery: Clone + Default + Send + Sync + std::fmt::Debug + 'static {
    /// No filter set: the collection lists instead of searching.
    fn is_empty(&self) -> bool;
}

/// Remote, paginated resource backing a [`crate::state::RemoteCollection`].
#[async_trait]
pub trait RemoteResource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + std::fmt::Debug + 'static;
    type Query: SearchQuery;
    type Stats: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch one page, listing when `query` is empty and searching otherwise.
    async fn fetch_page(
        &self,
        query: &Self::Query,
        page: PageRequest,
        cancel: CancellationToken,
    ) -> Result<PaginatedResponse<Self::Item>>;

    /// Fetch one item; `Ok(None)` when the server reports it does not exist.
    async fn fetch_item(&self, uid: &str, cancel: CancellationToken) -> Result<Option<Self::Item>>;

    /// Fetch aggregate numbers for the list page.
    async fn fetch_stats(&self, _cancel: CancellationToken) -> Result<Self::Stats> {
        Err(AppError::Unsupported("statistics"))
    }
}

/// Turn a 404 on a detail fetch into "no such item".
pub fn not_found_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

impl SearchQuery for shared::PartnerQuery {
    fn is_empty(&self) -> bool {
        shared::PartnerQuery::is_empty(self)
    }
}

impl SearchQuery for shared::AgentQuery {
    fn is_empty(&self) -> bool {
        shared::AgentQuery::is_empty(self)
    }
}

impl SearchQuery for shared::BookingQuery {
    fn is_empty(&self) -> bool {
        shared::BookingQuery::is_empty(self)
    }
}

impl SearchQuery for shared::BusQuery {
    fn is_empty(&self) -> bool {
        shared::BusQuery::is_empty(self)
    }
}

impl SearchQuery for shared::UserQuery {
    fn is_empty(&self) -> bool {
        shared::UserQuery::is_empty(self)
    }
}

impl SearchQuery for shared::RoleQuery {
    fn is_empty(&self) -> bool {
        shared::RoleQuery::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_none() {
        let missing: Result<u32> = Err(AppError::Api {
            status: 404,
            message: "Super agent not found".into(),
        });
        assert_eq!(not_found_as_none(missing), Ok(None));
        assert_eq!(not_found_as_none(Ok(7)), Ok(Some(7)));

        let forbidden: Result<u32> = Err(AppError::Unauthenticated);
        assert_eq!(not_found_as_none(forbidden), Err(AppError::Unauthenticated));
    }
}
