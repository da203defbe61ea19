//! Request wrapper and service modules against the fake partner API.

mod common;

use std::time::Duration;

use common::{FakeApi, TestServer, API_KEY, API_SECRET};
use dashboard::core::{AppError, ErrorKind};
use dashboard::services::api::{super_agents, QueryParams, RequestOptions};
use serde_json::Value;
use shared::{AgentQuery, EntityStatus, NewSuperAgent, PageRequest};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_credentials_are_attached_when_present() {
    let server = TestServer::start(FakeApi::with_super_agents(3)).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    super_agents::list(&client, PageRequest::new(0, 10).unwrap())
        .await
        .unwrap();

    let seen = server.api.requests_to("/api/super-agents");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].api_key.as_deref(), Some(API_KEY));
    assert_eq!(seen[0].api_secret.as_deref(), Some(API_SECRET));
}

#[tokio::test]
async fn test_no_headers_without_credentials() {
    let server = TestServer::start(FakeApi::with_super_agents(3)).await;
    let client = server.client(None);

    let err = super_agents::list(&client, PageRequest::first(10).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Unauthenticated);

    let seen = server.api.requests_to("/api/super-agents");
    assert_eq!(seen.len(), 1, "request is still sent");
    assert!(seen[0].api_key.is_none());
    assert!(seen[0].api_secret.is_none());
}

#[tokio::test]
async fn test_half_a_pair_sends_nothing() {
    let server = TestServer::start(FakeApi::with_super_agents(3)).await;
    let client = server.client(Some((API_KEY, "")));

    let err = super_agents::get_statistics(&client).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthenticated);

    let seen = server.api.requests_to("/api/super-agents/statistics");
    assert!(seen[0].api_key.is_none());
}

#[tokio::test]
async fn test_wrong_credentials_are_unauthorized() {
    let server = TestServer::start(FakeApi::with_super_agents(3)).await;
    let client = server.client(Some(("pk_wrong", "sk_wrong")));

    let err = super_agents::get_by_uid(&client, "SA-001").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Unauthorized {
            status: 401,
            message: "Invalid API key or secret".into()
        }
    );
    assert!(err.needs_credentials());
}

#[tokio::test]
async fn test_pagination_and_search_params() {
    let server = TestServer::start(FakeApi::with_super_agents(25)).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let page = super_agents::list(&client, PageRequest::new(2, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 5);
    assert!(page.validate().is_ok());
    assert_eq!(page.items[0].extra.get("region"), Some(&Value::from("north")));

    let query = AgentQuery::by_name("agency 1");
    let found = super_agents::search(&client, &query, PageRequest::first(10).unwrap())
        .await
        .unwrap();
    // Agency 1, 10-19
    assert_eq!(found.total_items, 11);

    let seen = server.api.requests_to("/api/super-agents/search");
    assert_eq!(seen[0].query.get("businessName").map(String::as_str), Some("agency 1"));
    assert_eq!(seen[0].query.get("page").map(String::as_str), Some("0"));
    assert_eq!(seen[0].query.get("size").map(String::as_str), Some("10"));
    assert!(!seen[0].query.contains_key("partnerUid"));
    assert!(!seen[0].query.contains_key("status"));
}

#[tokio::test]
async fn test_super_agent_operations() {
    let server = TestServer::start(FakeApi::with_super_agents(2)).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let updated = super_agents::update_status(&client, "SA-002", EntityStatus::Suspended)
        .await
        .unwrap();
    assert_eq!(updated.status, Some(EntityStatus::Suspended));
    let seen = server.api.requests_to("/api/super-agents/SA-002/update-status");
    assert_eq!(seen[0].query.get("status").map(String::as_str), Some("SUSPENDED"));

    super_agents::assign_sub_agent(&client, "SA-001", "A-9").await.unwrap();
    super_agents::remove_sub_agent(&client, "SA-001", "A-9").await.unwrap();
    let seen = server.api.requests_to("/api/super-agents/SA-001/assign");
    assert_eq!(seen[0].query.get("agentUid").map(String::as_str), Some("A-9"));

    let count = super_agents::get_sub_agents_count(&client, "SA-001").await.unwrap();
    assert_eq!(count.count, 6);

    let tree = super_agents::get_hierarchy(&client, "SA-001").await.unwrap();
    assert_eq!(tree.descendant_count(), 3);

    let stats = super_agents::get_statistics(&client).await.unwrap();
    assert_eq!(stats.total, 2);
    assert!(stats.extra.contains_key("suspendedToday"));
}

#[tokio::test]
async fn test_create_then_get_by_uid() {
    let server = TestServer::start(FakeApi::with_super_agents(2)).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let payload = NewSuperAgent {
        business_name: "Harbour Tickets".into(),
        partner_uid: "P-1".into(),
        email: "ops@harbour.example".into(),
        commission_rate: Some(3.0),
        ..Default::default()
    };
    let created = super_agents::create(&client, &payload).await.unwrap();
    assert!(!created.uid.is_empty());

    let fetched = super_agents::get_by_uid(&client, &created.uid).await.unwrap();
    assert_eq!(fetched.business_name, "Harbour Tickets");
    assert_eq!(fetched.commission_rate, Some(3.0));
}

#[tokio::test]
async fn test_server_messages_pass_through() {
    let server = TestServer::start(FakeApi::with_super_agents(1)).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let err = super_agents::get_by_uid(&client, "SA-404").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Server error (404): Super agent not found");

    let err = client
        .get::<Value>("rejected", RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Rejected("Partner is suspended".into()));

    let err = client.get::<Value>("html", RequestOptions::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[tokio::test]
async fn test_network_failure_is_distinct() {
    // Nothing listens on the discard port.
    let config = dashboard::config::Config::new(url::Url::parse("http://127.0.0.1:9/api").unwrap());
    let client = dashboard::services::api::ApiClient::new(
        &config,
        std::sync::Arc::new(dashboard::services::CredentialStore::in_memory()),
    )
    .unwrap();

    let err = super_agents::get_statistics(&client).await.unwrap_err();
    assert!(err.is_transport(), "got {err:?}");
}

#[tokio::test]
async fn test_per_call_timeout() {
    let server = TestServer::start(FakeApi::default()).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let opts = RequestOptions::new().timeout(Duration::from_millis(100));
    let err = client.get::<Value>("slow", opts).await.unwrap_err();
    assert_eq!(err, AppError::Timeout(Duration::from_millis(100)));
}

#[tokio::test]
async fn test_cancellation() {
    let server = TestServer::start(FakeApi::default()).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let opts = RequestOptions::new()
        .cancel_token(token)
        .params(QueryParams::new().with("probe", true));
    let err = client.get::<Value>("slow", opts).await.unwrap_err();
    assert_eq!(err, AppError::Cancelled);
}

#[tokio::test]
async fn test_empty_uid_never_hits_the_network() {
    let server = TestServer::start(FakeApi::default()).await;
    let client = server.client(Some((API_KEY, API_SECRET)));

    let err = super_agents::get_hierarchy(&client, "").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(server.api.requests.lock().is_empty());
}
