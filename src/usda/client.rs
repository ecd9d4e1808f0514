//! FoodData Central HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::{FdcFood, SearchResponse};
use super::{FoodSearch, SearchError, SearchResult};
use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::models::FoodCandidate;
use crate::nutrition::codex;

/// USDA FoodData Central API client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> SearchResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(BuildInfo::current().user_agent())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> SearchResult<Self> {
        Self::new(
            config.usda_api_url.clone(),
            config.usda_api_key.clone(),
            config.request_timeout,
        )
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> SearchResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch specific foods by FDC id, restricted to the tracked nutrients
    pub async fn fetch_foods(&self, fdc_ids: &[u64]) -> SearchResult<Vec<FoodCandidate>> {
        if fdc_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = fdc_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let nutrients = codex::tracked_codes().collect::<Vec<_>>().join(",");

        let foods: Vec<FdcFood> = self
            .get(
                "/foods",
                &[
                    ("fdcIds", ids),
                    ("format", "abridged".to_string()),
                    ("nutrients", nutrients),
                ],
            )
            .await?;

        Ok(foods.into_iter().map(FoodCandidate::from).collect())
    }
}

#[async_trait]
impl FoodSearch for UsdaClient {
    async fn search(&self, query: &str, page_size: u32) -> SearchResult<Vec<FoodCandidate>> {
        let response: SearchResponse = self
            .get(
                "/foods/search",
                &[("query", query.to_string()), ("pageSize", page_size.to_string())],
            )
            .await?;

        tracing::debug!("FoodData Central returned {} foods for '{}'", response.foods.len(), query);
        Ok(response.foods.into_iter().map(FoodCandidate::from).collect())
    }
}
