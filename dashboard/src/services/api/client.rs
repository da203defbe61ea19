//! # API Client
//!
//! The single chokepoint for outbound calls to the partner API.
//!
//! Each call:
//! 1. joins the already-substituted endpoint path onto the configured base URL
//! 2. serializes the flat query parameters
//! 3. snapshots the credential pair and attaches both headers, or neither
//! 4. performs exactly one round trip, bounded by the per-call timeout and the
//!    optional cancellation token (no retries, no caching)
//! 5. decodes 2xx bodies through the `ApiResponse<T>` envelope and maps everything
//!    else onto [`AppError`]

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiResponse, ErrorResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};
use url::Url;
use uuid::Uuid;

use super::params::RequestOptions;
use crate::config::Config;
use crate::core::error::{AppError, Result};
use crate::services::credentials::CredentialStore;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";
/// Header carrying the API secret.
pub const API_SECRET_HEADER: &str = "X-API-SECRET";

const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP client for the partner API.
///
/// Cheap to clone: the connection pool and the credential store are shared.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
    credentials: Arc<CredentialStore>,
    default_timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` reading credentials from `credentials`.
    pub fn new(config: &Config, credentials: Arc<CredentialStore>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("partner-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: normalize_base(config.api_base_url.clone()),
            credentials,
            default_timeout: config.request_timeout,
            cancel: None,
        })
    }

    /// Clone whose requests are all abandoned once `token` is cancelled.
    ///
    /// Service functions take a plain `&ApiClient`; this is how a caller ties a whole
    /// service call to its own lifecycle without threading a token through it.
    pub fn with_cancel(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Validation(format!("invalid endpoint path `{path}`: {e}")))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, opts: RequestOptions) -> Result<T> {
        self.send::<(), T>(Method::GET, path, None, opts).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, opts: RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), opts).await
    }

    /// POST without a body (parameters travel in the query string).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, opts: RequestOptions) -> Result<T> {
        self.send::<(), T>(Method::POST, path, None, opts).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, opts: RequestOptions) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body), opts).await
    }

    /// PUT without a body (parameters travel in the query string).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str, opts: RequestOptions) -> Result<T> {
        self.send::<(), T>(Method::PUT, path, None, opts).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, opts: RequestOptions) -> Result<T> {
        self.send::<(), T>(Method::DELETE, path, None, opts).await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("api_request", %request_id, method = %method, path = %path);

        async move {
            let url = self.url(path)?;

            // One snapshot per request: a rotation mid-flight cannot mix pairs.
            let credentials = self.credentials.snapshot();
            let sent_credentials = credentials.is_some();

            let mut request = self.client.request(method, url);
            let pairs = opts.params.to_pairs();
            if !pairs.is_empty() {
                request = request.query(&pairs);
            }
            if let Some(creds) = &credentials {
                request = request
                    .header(API_KEY_HEADER, creds.api_key.as_str())
                    .header(API_SECRET_HEADER, creds.api_secret.as_str());
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let timeout = opts.timeout.unwrap_or(self.default_timeout);
            let start = Instant::now();

            let exchange = async {
                let response = request.send().await.map_err(transport_error)?;
                let status = response.status();
                let bytes = response.bytes().await.map_err(transport_error)?;
                Ok::<_, AppError>((status, bytes))
            };
            let bounded = async {
                tokio::time::timeout(timeout, exchange)
                    .await
                    .unwrap_or(Err(AppError::Timeout(timeout)))
            };

            let cancel = opts.cancel.clone().or_else(|| self.cancel.clone());
            let outcome = match &cancel {
                Some(token) => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => Err(AppError::Cancelled),
                        result = bounded => result,
                    }
                }
                None => bounded.await,
            };

            let elapsed_ms = start.elapsed().as_millis();
            let (status, bytes) = match outcome {
                Ok(pair) => pair,
                Err(AppError::Cancelled) => {
                    debug!(elapsed_ms, "API call cancelled");
                    return Err(AppError::Cancelled);
                }
                Err(e) => {
                    warn!(error = %e, elapsed_ms, sent_credentials, "API call failed before a response");
                    return Err(e);
                }
            };

            let result = decode_response::<T>(status, &bytes, sent_credentials);
            match &result {
                Ok(_) => debug!(status = status.as_u16(), elapsed_ms, "API call completed"),
                Err(e) => warn!(
                    status = status.as_u16(),
                    error = %e,
                    elapsed_ms,
                    "API call returned an error"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

/// Make sure relative joins append to the base path instead of replacing its last segment.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::Validation(format!("invalid request: {err}"))
    } else if err.is_decode() {
        AppError::MalformedResponse(err.to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

/// Map a complete HTTP exchange onto the payload or an [`AppError`].
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    sent_credentials: bool,
) -> Result<T> {
    if status.is_success() {
        let envelope: ApiResponse<T> = if status == StatusCode::NO_CONTENT && body.is_empty() {
            ApiResponse {
                status: true,
                data: None,
                message: None,
            }
        } else {
            serde_json::from_slice(body).map_err(|e| {
                AppError::MalformedResponse(format!("unexpected response body: {e}"))
            })?
        };
        return envelope.into_result().map_err(AppError::from);
    }

    Err(AppError::from_status(
        status.as_u16(),
        error_message(status, body),
        sent_credentials,
    ))
}

/// Best message the server gave for a failure status.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        if let Some(text) = parsed.text() {
            return text.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() && !text.starts_with('{') {
        return text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
