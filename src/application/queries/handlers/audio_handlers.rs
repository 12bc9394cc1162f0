//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioCachePort;
use crate::application::queries::audio_queries::{GetAudioQuery, GetAudioResponse};
use crate::domain::normalize_text;
use crate::domain::speech::AudioPayload;

/// GetAudio Handler - 获取已缓存的音频，不刷新 last_used
pub struct GetAudioHandler {
    audio_cache: Arc<dyn AudioCachePort>,
}

impl GetAudioHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>) -> Self {
        Self { audio_cache }
    }

    pub async fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        // 与朗读相同：只拒绝空白文本，纯符号文本归一化为空 key 照常查找
        if query.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text is required"));
        }
        let normalized = normalize_text(&query.text);

        let entry = self
            .audio_cache
            .get(&normalized)
            .await
            .ok_or_else(|| ApplicationError::not_found("Audio", normalized.clone()))?;

        Ok(GetAudioResponse {
            normalized_text: normalized,
            voice: entry.voice_id,
            audio: AudioPayload::new(entry.audio_payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryAudioCache;

    #[tokio::test]
    async fn test_get_audio_by_variant_text() {
        let cache = InMemoryAudioCache::new().arc();
        cache
            .put("hello world", "Hello, World!", "AAAA", "Orus")
            .await
            .unwrap();
        let before = cache.get("hello world").await.unwrap().last_used;

        let handler = GetAudioHandler::new(cache.clone());
        let response = handler
            .handle(GetAudioQuery {
                text: "HELLO... world".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.audio.as_str(), "AAAA");
        assert_eq!(response.voice, "Orus");
        assert_eq!(cache.get("hello world").await.unwrap().last_used, before);
    }

    #[tokio::test]
    async fn test_get_audio_not_cached() {
        let handler = GetAudioHandler::new(InMemoryAudioCache::new().arc());
        let result = handler
            .handle(GetAudioQuery {
                text: "nothing here".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));

        let result = handler
            .handle(GetAudioQuery {
                text: "?!".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));

        let result = handler
            .handle(GetAudioQuery {
                text: "   ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_symbol_only_text_finds_spoken_audio() {
        let cache = InMemoryAudioCache::new().arc();
        cache.put("", "!!!", "AAAA", "Orus").await.unwrap();

        let handler = GetAudioHandler::new(cache);
        let response = handler
            .handle(GetAudioQuery {
                text: "?!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.normalized_text, "");
        assert_eq!(response.audio.as_str(), "AAAA");
    }
}
