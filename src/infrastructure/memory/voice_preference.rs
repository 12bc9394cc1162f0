//! In-Memory Voice Preference
//!
//! 禁用持久化缓存时使用，进程退出后丢失

use async_trait::async_trait;
use std::sync::RwLock;

use crate::application::ports::{CacheError, VoicePreferencePort};
use crate::domain::speech::VoiceName;

#[derive(Debug, Default)]
pub struct InMemoryVoicePreference {
    voice: RwLock<Option<VoiceName>>,
}

impl InMemoryVoicePreference {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoicePreferencePort for InMemoryVoicePreference {
    async fn load(&self) -> Option<VoiceName> {
        *self.voice.read().unwrap_or_else(|e| e.into_inner())
    }

    async fn save(&self, voice: VoiceName) -> Result<(), CacheError> {
        *self.voice.write().unwrap_or_else(|e| e.into_inner()) = Some(voice);
        Ok(())
    }
}
