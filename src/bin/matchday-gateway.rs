use log::{info, warn};
use matchday_api::freshness::FreshnessPolicy;
use matchday_api::gateway::{self, GatewayConfig, GatewayState};
use matchday_api::upstream::UpstreamClient;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GatewayConfig::from_env();
    let upstream = UpstreamClient::new(config.upstream_url.clone());
    if !upstream.is_configured() {
        warn!("APPS_SCRIPT_URL is not set; /api/dashboard will answer 500 until it is");
    }
    match config.freshness {
        FreshnessPolicy::NoStore => info!("freshness policy: no-store"),
        FreshnessPolicy::SharedTtl { seconds } => info!("freshness policy: shared cache for {seconds}s"),
    }

    let listener = TcpListener::bind(&config.bind).await?;
    info!("gateway listening on {}", config.bind);

    gateway::serve(listener, GatewayState::new(upstream, config.freshness)).await?;
    Ok(())
}
