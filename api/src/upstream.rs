use crate::freshness::{FreshnessPolicy, cache_busted};
use axum::http::StatusCode;
use chrono::Utc;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Upstream bodies are cut to this many characters before they are echoed.
pub const DETAILS_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing APPS_SCRIPT_URL env var")]
    Configuration,

    #[error("Upstream returned {status}")]
    Upstream { status: u16, details: String },

    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::Configuration | GatewayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            GatewayError::Upstream { details, .. } => Some(details),
            _ => None,
        }
    }
}

/// Reads the club sheet export. One GET per call, no retries: the next poll
/// is the retry.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("matchday-gateway/0.1")
                .build()
                .unwrap_or_default(),
            base_url: base_url.filter(|url| !url.trim().is_empty()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub async fn fetch(&self, policy: &FreshnessPolicy) -> Result<Value, GatewayError> {
        let base = self.base_url.as_deref().ok_or(GatewayError::Configuration)?;

        let url = if policy.busts_cache() {
            cache_busted(base, Utc::now().timestamp_millis())
        } else {
            base.to_owned()
        };

        let mut request = self.client.get(&url).timeout(self.timeout);
        if policy.busts_cache() {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        debug!("fetching dashboard from upstream");
        let response = request.send().await.map_err(|e| {
            warn!("upstream request failed: {e}");
            transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("upstream returned {status}");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                details: truncate_chars(&body, DETAILS_LIMIT),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            warn!("upstream body is not JSON: {e}");
            transport_error(e)
        })
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        return GatewayError::Transport("Upstream request timed out".to_string());
    }
    let message = e.to_string();
    if message.is_empty() {
        GatewayError::Transport("Unknown proxy error".to_string())
    } else {
        GatewayError::Transport(message)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
