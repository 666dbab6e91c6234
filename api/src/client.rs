use crate::Dataset;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_DASHBOARD_URL: &str = "http://127.0.0.1:3000/api/dashboard";

/// Characters of an error body shown to the user.
const ERROR_SNIPPET_LIMIT: usize = 120;

/// Client for the gateway's `/api/dashboard` endpoint.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl Default for DashboardClient {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api { status: u16, message: String },
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api { message, .. } => write!(f, "{message}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl DashboardClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("matchday/0.1 (terminal dashboard)")
                .build()
                .unwrap_or_default(),
            url: url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the latest snapshot. Gateway error envelopes come back as
    /// [`ApiError::Api`] with the status and the start of the body.
    pub async fn fetch_dashboard(&self) -> ApiResult<Dataset> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, self.url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: api_error_message(status.as_u16(), &text),
            });
        }

        response
            .json::<Dataset>()
            .await
            .map_err(|e| ApiError::Parsing(e, self.url.clone()))
    }
}

fn api_error_message(status: u16, body: &str) -> String {
    let snippet: String = body.chars().take(ERROR_SNIPPET_LIMIT).collect();
    if snippet.is_empty() {
        format!("API error: {status}")
    } else {
        format!("API error: {status} — {snippet}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_includes_status_and_snippet() {
        assert_eq!(api_error_message(500, ""), "API error: 500");
        let long = "y".repeat(300);
        let msg = api_error_message(502, &long);
        assert!(msg.starts_with("API error: 502 — "));
        assert_eq!(msg.chars().filter(|c| *c == 'y').count(), ERROR_SNIPPET_LIMIT);
    }

    #[tokio::test]
    async fn fetch_reads_dataset() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/dashboard")
            .with_status(200)
            .with_body(
                json!({
                    "nextFixture": [{ "Team": "NDSC", "date": "2026-06-06T18:30:00Z" }],
                    "homeRunLeaders": [{ "Player": "B. Jones", "Home_Runs": 4 }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = DashboardClient::new(format!("{}/api/dashboard", server.url()));
        let data = client.fetch_dashboard().await.unwrap();
        assert_eq!(data.next_fixture.len(), 1);
        assert_eq!(data.home_run_leaders[0].count(), 4.0);
        assert!(data.league_table.is_empty());
    }

    #[tokio::test]
    async fn gateway_envelope_becomes_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/dashboard")
            .with_status(502)
            .with_body(r#"{"error":"Upstream returned 503","details":""}"#)
            .create_async()
            .await;

        let client = DashboardClient::new(format!("{}/api/dashboard", server.url()));
        let err = client.fetch_dashboard().await.unwrap_err();
        match &err {
            ApiError::Api { status, message } => {
                assert_eq!(*status, 502);
                assert!(message.contains("Upstream returned 503"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/dashboard")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = DashboardClient::new(format!("{}/api/dashboard", server.url()));
        assert!(matches!(
            client.fetch_dashboard().await,
            Err(ApiError::Parsing(_, _))
        ));
    }
}
