//! Sled-based Voice Preference

use async_trait::async_trait;
use std::sync::Arc;

use super::database::SledDatabase;
use crate::application::ports::{CacheError, VoicePreferencePort};
use crate::domain::speech::VoiceName;

const VOICE_KEY: &str = "voice";

/// Sled 音色偏好存储
pub struct SledVoicePreference {
    database: Arc<SledDatabase>,
}

impl SledVoicePreference {
    pub fn new(database: Arc<SledDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl VoicePreferencePort for SledVoicePreference {
    async fn load(&self) -> Option<VoiceName> {
        let store = self.database.store().await?;

        let raw = match store.preferences.get(VOICE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read voice preference");
                return None;
            }
        };

        let value = String::from_utf8_lossy(&raw);
        match value.parse::<VoiceName>() {
            Ok(voice) => Some(voice),
            Err(_) => {
                tracing::warn!(stored = %value, "Ignoring unknown stored voice");
                None
            }
        }
    }

    async fn save(&self, voice: VoiceName) -> Result<(), CacheError> {
        let store = self.database.store().await.ok_or_else(|| {
            CacheError::StoreUnavailable(format!("store is {}", self.database.state().as_str()))
        })?;

        store
            .preferences
            .insert(VOICE_KEY, voice.as_str().as_bytes())
            .map_err(|e| CacheError::StoreIo(e.to_string()))?;

        tracing::debug!(voice = %voice, "Voice preference saved");
        Ok(())
    }
}
