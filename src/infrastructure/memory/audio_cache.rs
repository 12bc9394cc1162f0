//! In-Memory Audio Cache Implementation
//!
//! 与 Sled 实现遵循相同的契约，用于测试和禁用持久化缓存的场景

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::application::ports::{
    AudioCachePort, CacheEntry, CacheError, MonotonicClock, StoreState,
};

#[derive(Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    /// (last_used, key) 升序
    recency: BTreeSet<(i64, String)>,
}

/// 内存音频缓存
pub struct InMemoryAudioCache {
    inner: RwLock<Inner>,
    clock: MonotonicClock,
    available: bool,
}

impl InMemoryAudioCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock: MonotonicClock::new(),
            available: true,
        }
    }

    /// 模拟存储不可用：读取总是未命中，写入总是失败
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn unavailable_error() -> CacheError {
        CacheError::StoreUnavailable("in-memory store disabled".to_string())
    }
}

impl Default for InMemoryAudioCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCachePort for InMemoryAudioCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        if !self.available {
            return None;
        }
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.get(key).cloned()
    }

    async fn put(
        &self,
        key: &str,
        original_text: &str,
        audio_payload: &str,
        voice_id: &str,
    ) -> Result<(), CacheError> {
        if !self.available {
            return Err(Self::unavailable_error());
        }

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let last_used = self.clock.next();
        let entry = CacheEntry {
            normalized_key: key.to_string(),
            original_text: original_text.to_string(),
            audio_payload: audio_payload.to_string(),
            voice_id: voice_id.to_string(),
            last_used,
        };

        if let Some(previous) = inner.entries.insert(key.to_string(), entry) {
            inner.recency.remove(&(previous.last_used, key.to_string()));
        }
        inner.recency.insert((last_used, key.to_string()));
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Vec<CacheEntry> {
        if !self.available {
            return Vec::new();
        }
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .recency
            .iter()
            .rev()
            .take(limit)
            .filter_map(|(_, key)| inner.entries.get(key).cloned())
            .collect()
    }

    async fn clear_all(&self) -> Result<(), CacheError> {
        if !self.available {
            return Err(CacheError::ClearFailed(Self::unavailable_error().to_string()));
        }
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.entries.clear();
        inner.recency.clear();
        Ok(())
    }

    fn state(&self) -> StoreState {
        if self.available {
            StoreState::Ready
        } else {
            StoreState::Failed
        }
    }

    async fn len(&self) -> usize {
        if !self.available {
            return 0;
        }
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }
}
