//! Sled-based Audio Cache Implementation

use async_trait::async_trait;
use sled::transaction::{TransactionError, Transactional};
use std::sync::Arc;

use super::database::{parse_recency_key, recency_key, OpenStore, SledDatabase, StoredEntry};
use crate::application::ports::{AudioCachePort, CacheEntry, CacheError, StoreState};

/// Sled 音频缓存
pub struct SledAudioCache {
    database: Arc<SledDatabase>,
}

impl SledAudioCache {
    pub fn new(database: Arc<SledDatabase>) -> Self {
        Self { database }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    async fn store(&self) -> Option<&OpenStore> {
        self.database.store().await
    }

    /// 读取并解码条目
    fn read_entry(store: &OpenStore, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let Some(data) = store
            .entries
            .get(key.as_bytes())
            .map_err(|e| CacheError::StoreIo(e.to_string()))?
        else {
            return Ok(None);
        };

        let stored: StoredEntry = bincode::deserialize(&data)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        Ok(Some(CacheEntry {
            normalized_key: key.to_string(),
            original_text: stored.original_text,
            audio_payload: stored.audio_payload,
            voice_id: stored.voice_id,
            last_used: stored.last_used,
        }))
    }

    fn collect_recent(store: &OpenStore, limit: usize) -> Result<Vec<CacheEntry>, CacheError> {
        let mut recent = Vec::with_capacity(limit.min(64));

        for item in store.recency.iter().rev() {
            if recent.len() >= limit {
                break;
            }
            let (index_key, _) = item.map_err(|e| CacheError::StoreIo(e.to_string()))?;
            let Some((last_used, key)) = parse_recency_key(&index_key) else {
                continue;
            };

            // 索引项可能落后于条目（旧记录损坏时未能删除），以条目为准
            match Self::read_entry(store, &key)? {
                Some(entry) if entry.last_used == last_used => recent.push(entry),
                _ => continue,
            }
        }

        Ok(recent)
    }
}

#[async_trait]
impl AudioCachePort for SledAudioCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        let store = self.store().await?;

        match Self::read_entry(store, key) {
            Ok(Some(entry)) => {
                tracing::debug!(key = %key, "Cache hit");
                Some(entry)
            }
            Ok(None) => {
                tracing::debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        original_text: &str,
        audio_payload: &str,
        voice_id: &str,
    ) -> Result<(), CacheError> {
        let store = self.store().await.ok_or_else(|| {
            CacheError::StoreUnavailable(format!("store is {}", self.database.state().as_str()))
        })?;

        let last_used = store.clock.next();
        let stored = StoredEntry {
            original_text: original_text.to_string(),
            audio_payload: audio_payload.to_string(),
            voice_id: voice_id.to_string(),
            last_used,
        };
        let record =
            bincode::serialize(&stored).map_err(|e| CacheError::SerializationError(e.to_string()))?;
        let index_key = recency_key(last_used, key);

        // 条目与索引在同一事务中更新
        let outcome: Result<(), TransactionError<()>> = (&store.entries, &store.recency)
            .transaction(|(entries, recency)| {
                if let Some(previous) = entries.insert(key.as_bytes(), record.as_slice())? {
                    if let Ok(previous) = bincode::deserialize::<StoredEntry>(&previous) {
                        recency.remove(recency_key(previous.last_used, key))?;
                    }
                }
                recency.insert(index_key.as_slice(), Vec::<u8>::new())?;
                Ok(())
            });

        match outcome {
            Ok(()) => {
                tracing::debug!(
                    key = %key,
                    voice_id = %voice_id,
                    payload_len = audio_payload.len(),
                    last_used = last_used,
                    "Audio cached"
                );
                Ok(())
            }
            Err(TransactionError::Storage(e)) => Err(CacheError::StoreIo(e.to_string())),
            Err(TransactionError::Abort(())) => {
                Err(CacheError::StoreIo("cache transaction aborted".to_string()))
            }
        }
    }

    async fn list_recent(&self, limit: usize) -> Vec<CacheEntry> {
        if limit == 0 {
            return Vec::new();
        }
        let Some(store) = self.store().await else {
            return Vec::new();
        };

        Self::collect_recent(store, limit).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to list cached entries");
            Vec::new()
        })
    }

    async fn clear_all(&self) -> Result<(), CacheError> {
        let store = self.store().await.ok_or_else(|| {
            CacheError::ClearFailed(format!("store is {}", self.database.state().as_str()))
        })?;

        store
            .entries
            .clear()
            .map_err(|e| CacheError::ClearFailed(e.to_string()))?;
        store
            .recency
            .clear()
            .map_err(|e| CacheError::ClearFailed(e.to_string()))?;
        store
            .db
            .flush_async()
            .await
            .map_err(|e| CacheError::ClearFailed(e.to_string()))?;

        tracing::info!("Audio cache cleared");
        Ok(())
    }

    fn state(&self) -> StoreState {
        self.database.state()
    }

    async fn len(&self) -> usize {
        match self.store().await {
            Some(store) => store.entries.len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize_text;
    use crate::infrastructure::persistence::sled::{SledCacheConfig, SCHEMA_VERSION};
    use tempfile::tempdir;

    fn open_cache(path: &std::path::Path) -> (Arc<SledDatabase>, SledAudioCache) {
        let database = SledDatabase::new(SledCacheConfig {
            db_path: path.to_string_lossy().to_string(),
            enabled: true,
        })
        .arc();
        (database.clone(), SledAudioCache::new(database))
    }

    #[tokio::test]
    async fn test_cache_put_get() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        cache
            .put("hello world", "Hello, World!", "AAAA", "Orus")
            .await
            .unwrap();

        let entry = cache.get("hello world").await.unwrap();
        assert_eq!(entry.original_text, "Hello, World!");
        assert_eq!(entry.audio_payload, "AAAA");
        assert_eq!(entry.voice_id, "Orus");
        assert_eq!(cache.state(), StoreState::Ready);
    }

    #[tokio::test]
    async fn test_normalized_lookup_hits() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        cache
            .put("hello world", "Hello, World!", "AAAA", "Orus")
            .await
            .unwrap();

        let entry = cache.get(&normalize_text("  hello   WORLD  ")).await.unwrap();
        assert_eq!(entry.audio_payload, "AAAA");
    }

    #[tokio::test]
    async fn test_get_does_not_touch_recency() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        cache.put("a", "a", "AAAA", "Orus").await.unwrap();
        cache.put("b", "b", "BBBB", "Orus").await.unwrap();
        let before = cache.get("a").await.unwrap();
        let _ = cache.get("a").await;

        assert_eq!(cache.get("a").await.unwrap().last_used, before.last_used);
        let keys: Vec<_> = cache
            .list_recent(10)
            .await
            .into_iter()
            .map(|e| e.normalized_key)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_fields_and_index() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        cache.put("thank you", "Thank you.", "AAAA", "Orus").await.unwrap();
        let first = cache.get("thank you").await.unwrap();
        cache.put("thank you", "THANK YOU!", "BBBB", "Charon").await.unwrap();
        let second = cache.get("thank you").await.unwrap();

        assert_eq!(second.original_text, "THANK YOU!");
        assert_eq!(second.audio_payload, "BBBB");
        assert_eq!(second.voice_id, "Charon");
        assert!(second.last_used > first.last_used);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.list_recent(30).await, vec![second]);
    }

    #[tokio::test]
    async fn test_list_recent_order_and_limit() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        for i in 0..40 {
            cache
                .put(&format!("phrase {}", i), &format!("Phrase {}", i), "AAAA", "Orus")
                .await
                .unwrap();
        }

        let recent = cache.list_recent(30).await;
        assert_eq!(recent.len(), 30);
        assert_eq!(recent[0].normalized_key, "phrase 39");
        assert_eq!(recent[29].normalized_key, "phrase 10");
        assert!(recent.windows(2).all(|w| w[0].last_used > w[1].last_used));

        assert_eq!(cache.list_recent(100).await.len(), 40);
        assert!(cache.list_recent(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        cache.put("a", "a", "AAAA", "Orus").await.unwrap();
        cache.put("b", "b", "BBBB", "Orus").await.unwrap();
        cache.clear_all().await.unwrap();

        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_none());
        assert!(cache.list_recent(30).await.is_empty());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_payload_round_trips_byte_identical() {
        let dir = tempdir().unwrap();
        let (_db, cache) = open_cache(&dir.path().join("test.sled"));

        let payload: String = (0..10_000)
            .map(|i| (b'A' + (i % 26) as u8) as char)
            .collect::<String>()
            + "+/==";
        cache.put("long", "Long", &payload, "Puck").await.unwrap();

        assert_eq!(cache.get("long").await.unwrap().audio_payload, payload);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sled");

        let first_used = {
            let (db, cache) = open_cache(&path);
            cache.put("a", "A!", "AAAA", "Orus").await.unwrap();
            db.flush().await.unwrap();
            cache.get("a").await.unwrap().last_used
        };

        let (_db, cache) = open_cache(&path);
        let entry = cache.get("a").await.unwrap();
        assert_eq!(entry.original_text, "A!");
        assert_eq!(entry.audio_payload, "AAAA");

        // 重新打开后时间戳仍然递增
        cache.put("b", "B", "BBBB", "Orus").await.unwrap();
        assert!(cache.get("b").await.unwrap().last_used > first_used);
    }

    #[tokio::test]
    async fn test_schema_mismatch_rebuilds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sled");

        {
            let (db, cache) = open_cache(&path);
            cache.put("a", "A", "AAAA", "Orus").await.unwrap();
            db.flush().await.unwrap();
        }
        {
            let raw = sled::open(&path).unwrap();
            let meta = raw.open_tree("meta").unwrap();
            meta.insert("schema_version", (SCHEMA_VERSION + 1).to_be_bytes().to_vec())
                .unwrap();
            raw.flush().unwrap();
        }

        let (_db, cache) = open_cache(&path);
        assert!(cache.get("a").await.is_none());
        assert!(cache.list_recent(30).await.is_empty());
        assert_eq!(cache.state(), StoreState::Ready);
    }

    #[tokio::test]
    async fn test_unavailable_store_is_soft() {
        let database = SledDatabase::new(SledCacheConfig {
            db_path: String::new(),
            enabled: false,
        })
        .arc();
        let cache = SledAudioCache::new(database);

        assert!(cache.get("anything").await.is_none());
        assert!(matches!(
            cache.put("k", "K", "AAAA", "Orus").await,
            Err(CacheError::StoreUnavailable(_))
        ));
        assert!(cache.list_recent(30).await.is_empty());
        assert!(matches!(
            cache.clear_all().await,
            Err(CacheError::ClearFailed(_))
        ));
        assert_eq!(cache.state(), StoreState::Failed);
    }
}
