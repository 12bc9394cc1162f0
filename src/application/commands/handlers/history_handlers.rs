//! History Command Handlers

use std::sync::Arc;

use crate::application::commands::ClearHistoryCommand;
use crate::application::error::ApplicationError;
use crate::application::ports::AudioCachePort;
use crate::infrastructure::memory::DebugLog;

/// ClearHistory Handler
///
/// 历史记录即缓存条目，清空历史等于清空整个音频缓存
pub struct ClearHistoryHandler {
    audio_cache: Arc<dyn AudioCachePort>,
    debug_log: Arc<DebugLog>,
}

impl ClearHistoryHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>, debug_log: Arc<DebugLog>) -> Self {
        Self {
            audio_cache,
            debug_log,
        }
    }

    pub async fn handle(&self, _cmd: ClearHistoryCommand) -> Result<(), ApplicationError> {
        match self.audio_cache.clear_all().await {
            Ok(()) => {
                self.debug_log.log("Audio cache cleared");
                Ok(())
            }
            Err(e) => {
                self.debug_log
                    .error(format!("Failed to clear audio cache: {}", e));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryAudioCache;

    #[tokio::test]
    async fn test_clear_empties_history() {
        let cache = InMemoryAudioCache::new().arc();
        cache.put("a", "A", "AAAA", "Orus").await.unwrap();
        cache.put("b", "B", "AAAA", "Orus").await.unwrap();

        let handler = ClearHistoryHandler::new(cache.clone(), DebugLog::default().arc());
        handler.handle(ClearHistoryCommand).await.unwrap();

        assert_eq!(cache.len().await, 0);
        assert!(cache.list_recent(30).await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_failure_propagates() {
        let log = DebugLog::default().arc();
        let handler = ClearHistoryHandler::new(InMemoryAudioCache::unavailable().arc(), log.clone());

        let result = handler.handle(ClearHistoryCommand).await;

        assert!(matches!(result, Err(ApplicationError::StorageError(_))));
        assert!(log
            .entries()
            .iter()
            .any(|e| e.message.starts_with("Failed to clear audio cache")));
    }
}
