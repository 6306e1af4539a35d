pub mod favorites;
pub mod sqlite;

use crate::app::Result;

pub use favorites::FavoritesStore;
pub use sqlite::SqliteStore;

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
