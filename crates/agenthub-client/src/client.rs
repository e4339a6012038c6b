//! HTTP client for the simulation backend
//!
//! One `reqwest::Client` is shared by every request so connections are
//! pooled. Requests carry no timeout unless one is configured; the
//! reachability probe always uses a short one.

use std::time::Duration;

use agenthub_types::{CycleReport, CyclePhase, Market, PhaseReport, SystemStatus};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::{ClientError, ClientResult, SimulationBackend};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client that connects to the simulation backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

/// Banner returned by `GET /`
#[derive(Debug, Clone, Deserialize)]
pub struct BackendInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub docs: Option<String>,
}

impl BackendClient {
    /// Create a client pointing at `base_url`.
    ///
    /// `request_timeout` bounds every request when set; `None` leaves
    /// requests to the transport's own behavior.
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the backend is reachable
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Fetch the backend banner
    pub async fn info(&self) -> ClientResult<BackendInfo> {
        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await?;

        decode(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "GET");
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        decode(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "POST");
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        decode(resp).await
    }
}

#[async_trait]
impl SimulationBackend for BackendClient {
    async fn fetch_status(&self) -> ClientResult<SystemStatus> {
        self.get("/api/status").await
    }

    async fn fetch_markets(&self) -> ClientResult<Vec<Market>> {
        self.get("/api/markets").await
    }

    async fn run_cycle(&self) -> ClientResult<CycleReport> {
        self.post("/api/cycle/run").await
    }

    async fn run_phase(&self, phase: CyclePhase) -> ClientResult<PhaseReport> {
        self.post(&format!("/api/cycle/{}", phase.path_segment())).await
    }
}

/// Turn a response into `T`, or into the error the backend described
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason().unwrap_or("Unknown error")),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// The backend reports failures as `{"detail": ...}`; fall back to the raw body
fn error_message(body: &str, fallback: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let detail = parsed.as_ref().and_then(|v| {
        v.get("detail")
            .or_else(|| v.get("message"))
            .and_then(|m| m.as_str())
    });

    match detail {
        Some(detail) => detail.to_string(),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => fallback.to_string(),
    }
}
