use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{DexError, Result};
use crate::catalog::CatalogState;
use crate::config::{ApiConfig, DisplayConfig};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::loader::LoadReport;
use crate::fetcher::{CatalogLoader, DetailCache, Fetcher};
use crate::store::{FavoritesStore, SqliteStore};

/// Shared services for the CLI commands and the TUI.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub cache: Arc<DetailCache>,
    pub loader: CatalogLoader,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, api: &ApiConfig) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(api.timeout_secs))?);
        Ok(Self::with_fetcher(store, fetcher, api))
    }

    pub fn in_memory(api: &ApiConfig) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(api.timeout_secs))?);
        Ok(Self::with_fetcher(store, fetcher, api))
    }

    pub fn with_fetcher(
        store: Arc<SqliteStore>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        api: &ApiConfig,
    ) -> Self {
        let cache = Arc::new(DetailCache::new(fetcher.clone()));
        let loader = CatalogLoader::new(fetcher.clone(), cache.clone())
            .with_source(&api.base_url, &api.resource)
            .with_limit(api.limit)
            .with_batch_size(api.batch_size);

        Self {
            store,
            fetcher,
            cache,
            loader,
        }
    }

    pub fn load_favorites(&self) -> FavoritesStore {
        FavoritesStore::load(self.store.clone())
    }

    /// Loads the collection and wraps it with the persisted favorites.
    pub async fn load_catalog(&self, display: &DisplayConfig) -> Result<CatalogState> {
        let LoadReport {
            items, skipped, ..
        } = self.loader.load_initial().await?;
        if skipped > 0 {
            tracing::warn!("{} items could not be loaded", skipped);
        }

        Ok(CatalogState::new(items, self.load_favorites())
            .with_page_sizes(display.page_size, &display.page_size_choices))
    }

    pub fn default_db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("dexterm.db"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("dexterm.log"))
    }

    fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| DexError::Config("Could not find data directory".into()))?;
        let dexterm_dir = data_dir.join("dexterm");
        std::fs::create_dir_all(&dexterm_dir)?;
        Ok(dexterm_dir)
    }
}
