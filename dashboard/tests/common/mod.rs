//! In-process fake of the partner API for integration tests.
//!
//! Serves super-agents and partners under `/api`, checks the credential headers the
//! way the real API does (403 without them, 401 when they are wrong) and records
//! every request it sees.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use url::Url;

use dashboard::config::Config;
use dashboard::services::api::ApiClient;
use dashboard::services::CredentialStore;

pub const API_KEY: &str = "pk_test_4f9a";
pub const API_SECRET: &str = "sk_test_77c1";

/// One request as the fake saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

#[derive(Default)]
pub struct FakeApi {
    pub requests: Mutex<Vec<Recorded>>,
    pub super_agents: Mutex<Vec<Value>>,
    /// Artificial latency per requested page index.
    pub page_delays: Mutex<HashMap<u32, u64>>,
    /// Status and message returned by the next API call instead of its normal answer.
    pub fail_next: Mutex<Option<(StatusCode, String)>>,
}

impl FakeApi {
    pub fn with_super_agents(count: usize) -> Self {
        let agents = (1..=count)
            .map(|n| {
                json!({
                    "uid": format!("SA-{n:03}"),
                    "businessName": format!("Agency {n}"),
                    "partnerUid": if n % 2 == 0 { "P-2" } else { "P-1" },
                    "status": "ACTIVE",
                    "commissionRate": 2.5,
                    "region": "north",
                })
            })
            .collect();
        Self {
            super_agents: Mutex::new(agents),
            ..Default::default()
        }
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub api: Arc<FakeApi>,
}

impl TestServer {
    pub async fn start(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let app = router(api.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, api }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    pub fn config(&self) -> Config {
        Config::new(self.base_url()).with_search_debounce(Duration::from_millis(50))
    }

    /// Client over a fresh in-memory credential store.
    pub fn client(&self, credentials: Option<(&str, &str)>) -> ApiClient {
        let store = Arc::new(CredentialStore::in_memory());
        if let Some((key, secret)) = credentials {
            store.set_api_credentials(key, secret);
        }
        ApiClient::new(&self.config(), store).unwrap()
    }
}

fn router(api: Arc<FakeApi>) -> Router {
    Router::new()
        .route("/api/partners", get(list_partners))
        .route("/api/super-agents", get(list_super_agents))
        .route("/api/super-agents/search", get(search_super_agents))
        .route("/api/super-agents/statistics", get(super_agent_statistics))
        .route("/api/super-agents/create", post(create_super_agent))
        .route("/api/super-agents/{uid}", get(get_super_agent))
        .route("/api/super-agents/{uid}/update-status", put(update_status))
        .route("/api/super-agents/{uid}/assign", post(link_sub_agent))
        .route("/api/super-agents/{uid}/remove", post(link_sub_agent))
        .route("/api/super-agents/{uid}/sub-agents/count", get(sub_agent_count))
        .route("/api/super-agents/{uid}/hierarchy", get(hierarchy))
        .route("/api/slow", get(slow))
        .route("/api/rejected", get(rejected))
        .route("/api/html", get(html))
        .layer(middleware::from_fn_with_state(api.clone(), guard))
        .with_state(api)
}

/// Records the request, then enforces the credential headers.
async fn guard(State(api): State<Arc<FakeApi>>, req: Request, next: Next) -> Response {
    let recorded = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let query = req
            .uri()
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Recorded {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query,
            api_key: header("X-API-KEY"),
            api_secret: header("X-API-SECRET"),
        }
    };
    api.requests.lock().push(recorded.clone());

    match (recorded.api_key.as_deref(), recorded.api_secret.as_deref()) {
        (None, _) | (_, None) => {
            return failure(StatusCode::FORBIDDEN, "Missing API credentials");
        }
        (Some(API_KEY), Some(API_SECRET)) => {}
        _ => return failure(StatusCode::UNAUTHORIZED, "Invalid API key or secret"),
    }

    if let Some((status, message)) = api.fail_next.lock().take() {
        return failure(status, &message);
    }

    next.run(req).await
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn ok(data: Value) -> Response {
    Json(json!({ "status": true, "data": data })).into_response()
}

fn page_params(query: &HashMap<String, String>) -> (u32, u32) {
    let page = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size = query.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    (page, size)
}

fn paginate(items: &[Value], page: u32, size: u32) -> Value {
    let start = (page as usize).saturating_mul(size as usize).min(items.len());
    let end = (start + size as usize).min(items.len());
    let total_items = items.len() as u64;
    let total_pages = total_items.div_ceil(u64::from(size));
    json!({
        "items": items[start..end].to_vec(),
        "page": page,
        "size": size,
        "totalItems": total_items,
        "totalPages": total_pages,
    })
}

async fn list_partners(Query(query): Query<HashMap<String, String>>) -> Response {
    let (page, size) = page_params(&query);
    let partners = vec![
        json!({ "uid": "P-1", "businessName": "Northern Coaches", "status": "ACTIVE" }),
        json!({ "uid": "P-2", "businessName": "Lakeside Transit", "status": "PENDING" }),
    ];
    ok(paginate(&partners, page, size))
}

async fn list_super_agents(
    State(api): State<Arc<FakeApi>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (page, size) = page_params(&query);
    let delay = api.page_delays.lock().get(&page).copied();
    if let Some(ms) = delay {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    let items = api.super_agents.lock().clone();
    ok(paginate(&items, page, size))
}

async fn search_super_agents(
    State(api): State<Arc<FakeApi>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (page, size) = page_params(&query);
    let name = query.get("businessName").cloned().unwrap_or_default();
    let items: Vec<Value> = api
        .super_agents
        .lock()
        .iter()
        .filter(|a| {
            a["businessName"]
                .as_str()
                .is_some_and(|n| n.to_lowercase().contains(&name.to_lowercase()))
        })
        .cloned()
        .collect();
    ok(paginate(&items, page, size))
}

async fn super_agent_statistics(State(api): State<Arc<FakeApi>>) -> Response {
    let total = api.super_agents.lock().len();
    ok(json!({ "total": total, "active": total, "inactive": 0, "suspendedToday": 0 }))
}

async fn create_super_agent(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    let Some(name) = body["businessName"].as_str() else {
        return failure(StatusCode::BAD_REQUEST, "businessName is required");
    };
    let mut agents = api.super_agents.lock();
    let mut created = body.clone();
    created["uid"] = json!(format!("SA-{:03}", agents.len() + 1));
    created["businessName"] = json!(name);
    created["status"] = json!("PENDING");
    agents.push(created.clone());
    ok(created)
}

async fn get_super_agent(State(api): State<Arc<FakeApi>>, Path(uid): Path<String>) -> Response {
    let found = api
        .super_agents
        .lock()
        .iter()
        .find(|a| a["uid"] == uid.as_str())
        .cloned();
    match found {
        Some(agent) => ok(agent),
        None => failure(StatusCode::NOT_FOUND, "Super agent not found"),
    }
}

async fn update_status(
    State(api): State<Arc<FakeApi>>,
    Path(uid): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(status) = query.get("status") else {
        return failure(StatusCode::BAD_REQUEST, "status is required");
    };
    let mut agents = api.super_agents.lock();
    match agents.iter_mut().find(|a| a["uid"] == uid.as_str()) {
        Some(agent) => {
            agent["status"] = json!(status);
            ok(agent.clone())
        }
        None => failure(StatusCode::NOT_FOUND, "Super agent not found"),
    }
}

async fn link_sub_agent(Query(query): Query<HashMap<String, String>>) -> Response {
    if query.contains_key("agentUid") {
        Json(json!({ "status": true, "data": null, "message": "ok" })).into_response()
    } else {
        failure(StatusCode::BAD_REQUEST, "agentUid is required")
    }
}

async fn sub_agent_count(Path(uid): Path<String>) -> Response {
    ok(json!({ "count": uid.len() }))
}

async fn hierarchy(Path(uid): Path<String>) -> Response {
    ok(json!({
        "uid": uid,
        "businessName": "Agency 1",
        "children": [
            { "uid": "A-1", "businessName": "Kiosk 1", "children": [
                { "uid": "A-3", "businessName": "Kiosk 3" }
            ]},
            { "uid": "A-2", "businessName": "Kiosk 2" }
        ]
    }))
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    ok(json!({}))
}

async fn rejected() -> Response {
    Json(json!({ "status": false, "data": null, "message": "Partner is suspended" })).into_response()
}

async fn html() -> Response {
    (StatusCode::OK, "<html>maintenance</html>").into_response()
}
