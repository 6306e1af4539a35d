pub mod cache;
pub mod http_fetcher;
pub mod loader;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::app::Result;

pub use cache::DetailCache;
pub use loader::CatalogLoader;

/// Retrieves the body of a URL.
///
/// Implementations return an error for transport failures and for
/// non-success status codes alike.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
