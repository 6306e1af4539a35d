use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::fetcher::Fetcher;

/// Write-once, process-lifetime cache of detail payloads keyed by URL.
///
/// Failed lookups are not cached. Two concurrent lookups of the same
/// unseen URL both hit the network; the first stored value is kept and
/// returned to both.
pub struct DetailCache {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    entries: RwLock<HashMap<String, Arc<Value>>>,
}

impl DetailCache {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the payload for `url`, fetching it on first use.
    ///
    /// `None` means the fetch failed or the body was not JSON.
    pub async fn get(&self, url: &str) -> Option<Arc<Value>> {
        if let Some(hit) = self.entries.read().await.get(url) {
            tracing::trace!("Cache hit for {}", url);
            return Some(hit.clone());
        }

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        let value: Value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Invalid JSON from {}: {}", url, e);
                return None;
            }
        };

        let stored = self
            .entries
            .write()
            .await
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(value))
            .clone();
        Some(stored)
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.entries.read().await.contains_key(url)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
