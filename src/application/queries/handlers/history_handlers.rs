//! History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioCachePort;
use crate::application::queries::history_queries::{
    CacheStatusResponse, GetCacheStatus, HistoryItem, ListHistory,
};

/// 默认历史条数
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// ListHistory Handler - 最近朗读记录（按 last_used 倒序）
pub struct ListHistoryHandler {
    audio_cache: Arc<dyn AudioCachePort>,
    max_items: usize,
}

impl ListHistoryHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>, max_items: usize) -> Self {
        Self {
            audio_cache,
            max_items,
        }
    }

    pub async fn handle(&self, query: ListHistory) -> Result<Vec<HistoryItem>, ApplicationError> {
        let limit = query
            .limit
            .map_or(self.max_items, |limit| limit.min(self.max_items));

        let items = self
            .audio_cache
            .list_recent(limit)
            .await
            .into_iter()
            .map(|entry| HistoryItem {
                id: entry.last_used.to_string(),
                text: entry.original_text,
                timestamp: entry.last_used,
            })
            .collect();

        Ok(items)
    }
}

/// GetCacheStatus Handler
pub struct GetCacheStatusHandler {
    audio_cache: Arc<dyn AudioCachePort>,
}

impl GetCacheStatusHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>) -> Self {
        Self { audio_cache }
    }

    pub async fn handle(&self, _query: GetCacheStatus) -> Result<CacheStatusResponse, ApplicationError> {
        // len 会触发惰性打开，先取数量再读状态
        let entries = self.audio_cache.len().await;
        Ok(CacheStatusResponse {
            state: self.audio_cache.state(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StoreState;
    use crate::infrastructure::memory::InMemoryAudioCache;

    #[tokio::test]
    async fn test_history_most_recent_first_and_capped() {
        let cache = InMemoryAudioCache::new().arc();
        for i in 0..40 {
            cache
                .put(&format!("phrase {}", i), &format!("Phrase {}!", i), "AAAA", "Orus")
                .await
                .unwrap();
        }
        // 命中刷新后排到最前
        cache.put("phrase 3", "Phrase 3?", "AAAA", "Orus").await.unwrap();

        let handler = ListHistoryHandler::new(cache, DEFAULT_HISTORY_LIMIT);

        let items = handler.handle(ListHistory::default()).await.unwrap();
        assert_eq!(items.len(), 30);
        assert_eq!(items[0].text, "Phrase 3?");
        assert_eq!(items[1].text, "Phrase 39!");
        assert!(items.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
        assert_eq!(items[0].id, items[0].timestamp.to_string());

        let items = handler
            .handle(ListHistory { limit: Some(100) })
            .await
            .unwrap();
        assert_eq!(items.len(), 30);

        let items = handler.handle(ListHistory { limit: Some(2) }).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_history_unavailable_store_is_empty() {
        let handler = ListHistoryHandler::new(InMemoryAudioCache::unavailable().arc(), 30);
        assert!(handler.handle(ListHistory::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_status() {
        let cache = InMemoryAudioCache::new().arc();
        cache.put("a", "A", "AAAA", "Orus").await.unwrap();

        let status = GetCacheStatusHandler::new(cache)
            .handle(GetCacheStatus)
            .await
            .unwrap();
        assert_eq!(status.state, StoreState::Ready);
        assert_eq!(status.entries, 1);

        let status = GetCacheStatusHandler::new(InMemoryAudioCache::unavailable().arc())
            .handle(GetCacheStatus)
            .await
            .unwrap();
        assert_eq!(status.state, StoreState::Failed);
        assert_eq!(status.entries, 0);
    }
}
