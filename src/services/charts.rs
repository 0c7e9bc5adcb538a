use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::charts::ChartsClient;
use crate::db::Store;
use crate::models::{NewGame, Platform, UnknownPlatform};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    InvalidPlatform(#[from] UnknownPlatform),

    #[error("unable to fetch remote chart data for {platform}")]
    Fetch {
        platform: Platform,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to store chart games for {platform}")]
    Persist {
        platform: Platform,
        #[source]
        source: anyhow::Error,
    },
}

/// Outcome of one platform during a populate run.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformPopulateStatus {
    pub platform: String,
    pub inserted: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulateReport {
    pub platforms: Vec<PlatformPopulateStatus>,
}

impl PopulateReport {
    #[must_use]
    pub fn failed(&self) -> bool {
        self.platforms.iter().any(|p| p.error.is_some())
    }

    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.platforms.iter().find_map(|p| p.error.as_deref())
    }
}

pub struct ChartService {
    store: Store,
    client: Arc<ChartsClient>,
    top_n: usize,
}

impl ChartService {
    pub fn new(store: Store, client: Arc<ChartsClient>, top_n: usize) -> Self {
        Self {
            store,
            client,
            top_n,
        }
    }

    /// Validates the platform, fetches its chart and returns the top `n`
    /// serialized records in source rank order. The platform check happens
    /// before any network call.
    pub async fn fetch_top_n(&self, platform: &str, n: usize) -> Result<Vec<NewGame>, ChartError> {
        let platform: Platform = platform.parse()?;
        self.fetch_for_platform(platform, n).await
    }

    async fn fetch_for_platform(
        &self,
        platform: Platform,
        n: usize,
    ) -> Result<Vec<NewGame>, ChartError> {
        info!("Fetching top {n} games for {platform}");

        let pages = self
            .client
            .fetch_top_chart(platform.as_str())
            .await
            .map_err(|source| ChartError::Fetch { platform, source })?;

        Ok(pages
            .into_iter()
            .flatten()
            .take(n)
            .map(NewGame::from)
            .collect())
    }

    /// Populates the store from every platform chart, strictly in order.
    /// The loop stops at the first failure; rows inserted for earlier
    /// platforms stay in place.
    pub async fn populate(&self) -> PopulateReport {
        let mut platforms = Vec::new();

        for platform in Platform::ALL {
            match self.populate_platform(platform).await {
                Ok(inserted) => {
                    info!("Populated {inserted} games for platform {platform}");
                    platforms.push(PlatformPopulateStatus {
                        platform: platform.to_string(),
                        inserted,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("Chart populate failed for {platform}: {e}");
                    platforms.push(PlatformPopulateStatus {
                        platform: platform.to_string(),
                        inserted: 0,
                        error: Some(e.to_string()),
                    });
                    break;
                }
            }
        }

        PopulateReport { platforms }
    }

    async fn populate_platform(&self, platform: Platform) -> Result<u64, ChartError> {
        let games = self.fetch_for_platform(platform, self.top_n).await?;

        self.store
            .bulk_create_games(&games)
            .await
            .map_err(|source| ChartError::Persist { platform, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service_with_unreachable_host() -> ChartService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        // Nothing listens here; a request would fail, a validation error
        // must not even try.
        let client = Arc::new(ChartsClient::with_base_url("http://127.0.0.1:1"));
        ChartService::new(store, client, 100)
    }

    #[tokio::test]
    async fn rejects_unknown_platform_before_any_request() {
        let service = service_with_unreachable_host().await;

        let err = service.fetch_top_n("windows", 10).await.unwrap_err();
        assert!(matches!(err, ChartError::InvalidPlatform(_)));
        assert!(err.to_string().contains("windows"));
    }

    #[tokio::test]
    async fn fetch_failure_is_a_distinct_error_kind() {
        let service = service_with_unreachable_host().await;

        let err = service.fetch_top_n("ios", 10).await.unwrap_err();
        assert!(matches!(err, ChartError::Fetch { .. }));
        assert!(err.to_string().contains("unable to fetch"));
    }
}
