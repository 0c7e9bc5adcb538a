use std::sync::Arc;

use crate::clients::charts::ChartsClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::ChartService;

/// Build a shared HTTP client with reasonable defaults for outbound calls.
/// Reused across services for connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Gamedex/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub charts: Arc<ChartService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.charts.request_timeout_seconds)?;
        let charts_client = Arc::new(ChartsClient::with_shared_client(
            http_client,
            config.charts.base_url.clone(),
        ));
        let charts = Arc::new(ChartService::new(
            store.clone(),
            charts_client,
            config.charts.top_n,
        ));

        Ok(Self {
            config,
            store,
            charts,
        })
    }
}
