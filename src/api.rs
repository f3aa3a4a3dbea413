use crate::config::ApiConfig;
use crate::error::SearchError;
use crate::models::SearchResponse;
use crate::search::SearchQuery;
use color_eyre::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

pub struct FlightProvider {
    client: Client,
    base_url: String,
}

impl FlightProvider {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single GET against the search endpoint. No retries.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let url = query.to_url(&self.base_url)?;
        debug!("GET {}", url);

        let result = self.fetch(url).await;
        match &result {
            Ok(res) => info!(
                "Search {} -> {} returned {} flights",
                query.origin,
                query.destination,
                res.flight_list().len()
            ),
            Err(e) => error!("Search {} -> {} failed: {}", query.origin, query.destination, e),
        }
        result
    }

    async fn fetch(&self, url: reqwest::Url) -> Result<SearchResponse, SearchError> {
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        serde_json::from_slice::<SearchResponse>(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}
