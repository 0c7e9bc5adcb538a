use anyhow::Result;
use reqwest::Client;

use crate::models::RawChartGame;

const DEFAULT_BASE_URL: &str = "https://interview-marketing-eng-dev.s3.eu-west-1.amazonaws.com";

#[derive(Clone)]
pub struct ChartsClient {
    client: Client,
    base_url: String,
}

impl Default for ChartsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the rank-ordered top chart for a platform. The feed body is an
    /// array of arrays of raw records, already sorted by rank.
    pub async fn fetch_top_chart(&self, platform: &str) -> Result<Vec<Vec<RawChartGame>>> {
        let url = format!("{}/{}.top100.json", self.base_url, platform);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!("chart feed error: {status} for {url}"));
        }

        Ok(response.json().await?)
    }
}
