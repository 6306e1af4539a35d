use std::collections::HashSet;
use std::sync::Arc;

use crate::app::Result;
use crate::store::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// User-marked item ids, written through to storage on every toggle.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore + Send + Sync>,
    ids: HashSet<u32>,
}

impl FavoritesStore {
    /// Reads the stored set. Missing, unreadable or corrupt data yields an
    /// empty set.
    pub fn load(storage: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        let ids = match storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!("Ignoring corrupt favorites ({}): {}", e, raw);
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                tracing::warn!("Could not read favorites: {}", e);
                HashSet::new()
            }
        };

        tracing::debug!("Loaded {} favorites", ids.len());
        Self { storage, ids }
    }

    /// Flips membership of `id` and persists the whole set.
    ///
    /// Returns whether `id` is now a favorite. The in-memory set is updated
    /// even when the write fails.
    pub fn toggle(&mut self, id: u32) -> Result<bool> {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn set(&self) -> &HashSet<u32> {
        &self.ids
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let encoded = serde_json::to_string(&self.ids())?;
        self.storage.set(FAVORITES_KEY, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DexError;
    use crate::store::SqliteStore;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every write.
    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<String>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads {
                return Err(DexError::Other("disk on fire".into()));
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(DexError::Other("read-only".into()));
            }
            self.writes.lock().unwrap().push(value.to_string());
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn seeded(raw: &str) -> Arc<MemoryStore> {
        let store = MemoryStore::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(FAVORITES_KEY.to_string(), raw.to_string());
        Arc::new(store)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let favorites = FavoritesStore::load(Arc::new(MemoryStore::default()));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_load_existing() {
        let favorites = FavoritesStore::load(seeded("[25, 1, 150]"));
        assert_eq!(favorites.ids(), vec![1, 25, 150]);
        assert!(favorites.is_favorite(25));
        assert!(!favorites.is_favorite(2));
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for raw in ["not json", "{\"a\":1}", "[-1]", "[\"x\"]"] {
            let favorites = FavoritesStore::load(seeded(raw));
            assert!(favorites.is_empty(), "{} should load as empty", raw);
        }
    }

    #[test]
    fn test_load_read_error_is_empty() {
        let store = MemoryStore {
            fail_reads: true,
            ..Default::default()
        };
        assert!(FavoritesStore::load(Arc::new(store)).is_empty());
    }

    #[test]
    fn test_toggle_twice_round_trips_with_two_writes() {
        let storage = seeded("[7]");
        let mut favorites = FavoritesStore::load(storage.clone());
        let before = favorites.ids();

        assert!(favorites.toggle(25).unwrap());
        assert!(favorites.is_favorite(25));
        assert!(!favorites.toggle(25).unwrap());

        assert_eq!(favorites.ids(), before);
        let writes = storage.writes.lock().unwrap().clone();
        assert_eq!(writes, vec!["[7,25]".to_string(), "[7]".to_string()]);
    }

    #[test]
    fn test_toggle_write_failure_still_updates_memory() {
        let storage = Arc::new(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let mut favorites = FavoritesStore::load(storage);

        assert!(favorites.toggle(4).is_err());
        assert!(favorites.is_favorite(4));
    }

    #[test]
    fn test_persisted_set_reloads() {
        let storage = Arc::new(SqliteStore::in_memory().unwrap());
        {
            let mut favorites = FavoritesStore::load(storage.clone());
            favorites.toggle(150).unwrap();
            favorites.toggle(6).unwrap();
        }

        let favorites = FavoritesStore::load(storage.clone());
        assert_eq!(favorites.ids(), vec![6, 150]);
        assert_eq!(storage.get(FAVORITES_KEY).unwrap(), Some("[6,150]".into()));
    }
}
