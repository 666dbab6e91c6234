//! HTTP surface in front of the club sheet.
//!
//! `GET /api/dashboard` passes the sheet export through untouched;
//! `GET /api/dashboard/view` serves the built view for clients that do not
//! want to shape the data themselves. Every failure comes back as
//! `{ "error": ..., "details"?: ... }` with a 500 or 502.

use crate::Dataset;
use crate::freshness::FreshnessPolicy;
use crate::upstream::{GatewayError, UpstreamClient};
use crate::view::{ViewOptions, build_view};
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use log::debug;
use serde_json::json;
use std::env;
use tokio::net::TcpListener;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub upstream_url: Option<String>,
    pub freshness: FreshnessPolicy,
    pub bind: String,
}

impl GatewayConfig {
    /// `APPS_SCRIPT_URL`, `MATCHDAY_CACHE_TTL`, `MATCHDAY_BIND` (or `PORT`).
    ///
    /// A missing upstream URL is not a startup failure; each request reports it.
    pub fn from_env() -> Self {
        let upstream_url = env::var("APPS_SCRIPT_URL").ok();
        let ttl = env::var("MATCHDAY_CACHE_TTL")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok());
        let bind = env::var("MATCHDAY_BIND").ok().unwrap_or_else(|| {
            env::var("PORT")
                .ok()
                .and_then(|p| p.trim().parse::<u16>().ok())
                .map(|port| format!("0.0.0.0:{port}"))
                .unwrap_or_else(|| DEFAULT_BIND.to_string())
        });

        Self {
            upstream_url,
            freshness: FreshnessPolicy::from_ttl(ttl),
            bind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayState {
    upstream: UpstreamClient,
    freshness: FreshnessPolicy,
}

impl GatewayState {
    pub fn new(upstream: UpstreamClient, freshness: FreshnessPolicy) -> Self {
        Self { upstream, freshness }
    }
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/dashboard/view", get(dashboard_view))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: GatewayState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

async fn dashboard(State(state): State<GatewayState>) -> Response {
    debug!("GET /api/dashboard");
    match state.upstream.fetch(&state.freshness).await {
        Ok(data) => (state.freshness.headers(), Json(data)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn dashboard_view(State(state): State<GatewayState>) -> Response {
    debug!("GET /api/dashboard/view");
    match state.upstream.fetch(&state.freshness).await {
        Ok(raw) => {
            let data = Dataset::from_value(raw);
            let view = build_view(&data, Utc::now(), &ViewOptions::default());
            (state.freshness.headers(), Json(view)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &GatewayError) -> Response {
    let body = match err.details() {
        Some(details) => json!({ "error": err.to_string(), "details": details }),
        None => json!({ "error": err.to_string() }),
    };
    let mut resp = (err.status_code(), Json(body)).into_response();
    resp.headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp
}
