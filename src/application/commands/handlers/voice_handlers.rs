//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{SelectVoiceCommand, SelectVoiceResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::VoicePreferencePort;

/// SelectVoice Handler
///
/// 保存失败只记录日志，本次请求仍使用所选音色
pub struct SelectVoiceHandler {
    voice_preference: Arc<dyn VoicePreferencePort>,
}

impl SelectVoiceHandler {
    pub fn new(voice_preference: Arc<dyn VoicePreferencePort>) -> Self {
        Self { voice_preference }
    }

    pub async fn handle(
        &self,
        cmd: SelectVoiceCommand,
    ) -> Result<SelectVoiceResponse, ApplicationError> {
        let persisted = match self.voice_preference.save(cmd.voice).await {
            Ok(()) => {
                tracing::info!(voice = %cmd.voice, "Voice preference saved");
                true
            }
            Err(e) => {
                tracing::warn!(voice = %cmd.voice, error = %e, "Failed to save voice preference");
                false
            }
        };

        Ok(SelectVoiceResponse {
            voice: cmd.voice,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CacheError;
    use crate::domain::speech::VoiceName;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryPreference {
        voice: Mutex<Option<VoiceName>>,
        broken: bool,
    }

    #[async_trait]
    impl VoicePreferencePort for MemoryPreference {
        async fn load(&self) -> Option<VoiceName> {
            *self.voice.lock().unwrap()
        }

        async fn save(&self, voice: VoiceName) -> Result<(), CacheError> {
            if self.broken {
                return Err(CacheError::StoreUnavailable("broken".to_string()));
            }
            *self.voice.lock().unwrap() = Some(voice);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_select_voice_persists() {
        let preference = Arc::new(MemoryPreference::default());
        let handler = SelectVoiceHandler::new(preference.clone());

        let response = handler
            .handle(SelectVoiceCommand {
                voice: VoiceName::Algenib,
            })
            .await
            .unwrap();

        assert!(response.persisted);
        assert_eq!(preference.load().await, Some(VoiceName::Algenib));
    }

    #[tokio::test]
    async fn test_select_voice_save_failure_not_fatal() {
        let handler = SelectVoiceHandler::new(Arc::new(MemoryPreference {
            broken: true,
            ..Default::default()
        }));

        let response = handler
            .handle(SelectVoiceCommand {
                voice: VoiceName::Puck,
            })
            .await
            .unwrap();

        assert_eq!(response.voice, VoiceName::Puck);
        assert!(!response.persisted);
    }
}
