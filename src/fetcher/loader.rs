use std::sync::Arc;

use futures::future::join_all;
use url::Url;

use crate::app::{DexError, Result};
use crate::domain::Item;
use crate::fetcher::{DetailCache, Fetcher};
use crate::normalizer::{Normalizer, RawIndex};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_RESOURCE: &str = "pokemon";
pub const DEFAULT_LIMIT: usize = 200;
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Outcome of one initial load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub items: Vec<Item>,
    pub requested: usize,
    pub skipped: usize,
}

/// Fetches the index, then every detail in sequential fixed-size batches.
pub struct CatalogLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    cache: Arc<DetailCache>,
    normalizer: Normalizer,
    base_url: String,
    resource: String,
    limit: usize,
    batch_size: usize,
}

impl CatalogLoader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, cache: Arc<DetailCache>) -> Self {
        Self {
            fetcher,
            cache,
            normalizer: Normalizer::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            limit: DEFAULT_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_source(mut self, base_url: &str, resource: &str) -> Self {
        self.base_url = base_url.to_string();
        self.resource = resource.to_string();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn index_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("limit", &self.limit.to_string());
        Ok(url)
    }

    /// Loads the collection. Only an index failure is an error; failed
    /// details are counted in [`LoadReport::skipped`] and left out.
    pub async fn load_initial(&self) -> Result<LoadReport> {
        let urls = self.fetch_index().await?;
        let mut report = LoadReport {
            requested: urls.len(),
            ..Default::default()
        };

        for (n, batch) in urls.chunks(self.batch_size).enumerate() {
            let payloads = join_all(batch.iter().map(|url| self.cache.get(url))).await;

            for payload in payloads {
                match payload.and_then(|p| self.normalizer.normalize_value(&p)) {
                    Some(item) => report.items.push(item),
                    None => report.skipped += 1,
                }
            }
            tracing::debug!("Batch {} settled ({} urls)", n + 1, batch.len());
        }

        tracing::info!(
            "Loaded {} of {} items ({} skipped)",
            report.items.len(),
            report.requested,
            report.skipped
        );
        Ok(report)
    }

    /// Fetches a single item through the detail cache.
    pub async fn load_one(&self, id: u32) -> Result<Item> {
        let url = self.detail_url(id)?;
        self.cache
            .get(url.as_str())
            .await
            .and_then(|payload| self.normalizer.normalize_value(&payload))
            .ok_or(DexError::ItemNotFound(id))
    }

    /// Same shape as the urls the index hands out, so both share cache entries.
    pub fn detail_url(&self, id: u32) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/'),
            id
        ))?)
    }

    async fn fetch_index(&self) -> Result<Vec<String>> {
        let url = self.index_url()?;
        let body = self
            .fetcher
            .fetch(url.as_str())
            .await
            .map_err(|e| DexError::IndexFetch(e.to_string()))?;
        let index: RawIndex = serde_json::from_slice(&body)
            .map_err(|e| DexError::IndexFetch(format!("malformed index: {}", e)))?;

        Ok(index
            .results
            .into_iter()
            .take(self.limit)
            .map(|entry| entry.url)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::mock::MockFetcher;
    use serde_json::json;

    const BASE: &str = "https://api.test/v2";

    fn detail_url(id: u32) -> String {
        format!("{}/pokemon/{}/", BASE, id)
    }

    fn seed(mock: &MockFetcher, count: u32, limit: usize) {
        let results: Vec<_> = (1..=count)
            .map(|id| json!({ "name": format!("p{}", id), "url": detail_url(id) }))
            .collect();
        mock.respond_json(
            &format!("{}/pokemon?limit={}", BASE, limit),
            json!({ "results": results }),
        );
        for id in 1..=count {
            mock.respond_json(
                &detail_url(id),
                json!({ "id": id, "name": format!("p{}", id), "types": [{ "type": { "name": "normal" } }] }),
            );
        }
    }

    fn loader(mock: Arc<MockFetcher>, limit: usize, batch: usize) -> CatalogLoader {
        let cache = Arc::new(DetailCache::new(mock.clone()));
        CatalogLoader::new(mock, cache)
            .with_source(BASE, "pokemon")
            .with_limit(limit)
            .with_batch_size(batch)
    }

    #[test]
    fn test_index_url() {
        let mock = Arc::new(MockFetcher::new());
        let loader = loader(mock, 200, 20).with_source("https://api.test/v2/", "/pokemon/");
        assert_eq!(
            loader.index_url().unwrap().as_str(),
            "https://api.test/v2/pokemon?limit=200"
        );
    }

    #[tokio::test]
    async fn test_load_all_in_batch_order() {
        let mock = Arc::new(MockFetcher::new());
        seed(&mock, 45, 50);

        let report = loader(mock.clone(), 50, 20).load_initial().await.unwrap();

        assert_eq!(report.requested, 45);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.items.len(), 45);

        // Every item of batch k precedes every item of batch k+1.
        let batch_of = |id: u32| (id - 1) / 20;
        let batches: Vec<u32> = report.items.iter().map(|i| batch_of(i.id)).collect();
        assert!(batches.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_in_flight_bounded_by_batch_size() {
        let mock = Arc::new(MockFetcher::new());
        seed(&mock, 30, 30);

        loader(mock.clone(), 30, 7).load_initial().await.unwrap();

        assert!(mock.max_in_flight() <= 7);
        assert!(mock.max_in_flight() > 1);
    }

    #[tokio::test]
    async fn test_failed_detail_is_skipped() {
        let mock = Arc::new(MockFetcher::new());
        seed(&mock, 5, 10);
        mock.respond(&detail_url(3), "not json");
        mock.respond_json(&detail_url(4), json!({ "name": "no-id" }));

        let report = loader(mock, 10, 2).load_initial().await.unwrap();

        let ids: Vec<u32> = report.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert_eq!(report.skipped, 2);
    }

    #[tokio::test]
    async fn test_index_failure_is_fatal() {
        let mock = Arc::new(MockFetcher::new());

        let err = loader(mock.clone(), 10, 5).load_initial().await.unwrap_err();

        assert!(matches!(err, DexError::IndexFetch(_)));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_index_is_fatal() {
        let mock = Arc::new(MockFetcher::new());
        mock.respond_json(&format!("{}/pokemon?limit=10", BASE), json!({ "count": 0 }));

        let err = loader(mock, 10, 5).load_initial().await.unwrap_err();
        assert!(matches!(err, DexError::IndexFetch(_)));
    }

    #[tokio::test]
    async fn test_load_one_shares_cache_with_index() {
        let mock = Arc::new(MockFetcher::new());
        seed(&mock, 3, 3);
        let loader = loader(mock.clone(), 3, 3);

        loader.load_initial().await.unwrap();
        let item = loader.load_one(2).await.unwrap();

        assert_eq!(item.name, "p2");
        assert_eq!(mock.call_count(&detail_url(2)), 1);
    }

    #[tokio::test]
    async fn test_load_one_missing() {
        let mock = Arc::new(MockFetcher::new());
        let err = loader(mock, 3, 3).load_one(999).await.unwrap_err();
        assert!(matches!(err, DexError::ItemNotFound(999)));
    }

    #[tokio::test]
    async fn test_index_longer_than_limit_is_truncated() {
        let mock = Arc::new(MockFetcher::new());
        seed(&mock, 8, 5);

        let report = loader(mock, 5, 20).load_initial().await.unwrap();
        assert_eq!(report.requested, 5);
        assert_eq!(report.items.len(), 5);
    }
}
