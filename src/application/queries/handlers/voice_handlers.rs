//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::VoicePreferencePort;
use crate::application::queries::{GetSelectedVoice, ListPhrases, ListVoices};
use crate::domain::speech::{VoiceName, VoiceOption, AVAILABLE_VOICES, QUICK_PHRASES};

/// ListVoices Handler
#[derive(Default)]
pub struct ListVoicesHandler;

impl ListVoicesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceOption>, ApplicationError> {
        Ok(AVAILABLE_VOICES.to_vec())
    }
}

/// GetSelectedVoice Handler - 未保存时返回默认音色
pub struct GetSelectedVoiceHandler {
    voice_preference: Arc<dyn VoicePreferencePort>,
}

impl GetSelectedVoiceHandler {
    pub fn new(voice_preference: Arc<dyn VoicePreferencePort>) -> Self {
        Self { voice_preference }
    }

    pub async fn handle(&self, _query: GetSelectedVoice) -> Result<VoiceName, ApplicationError> {
        Ok(self.voice_preference.load().await.unwrap_or_default())
    }
}

/// ListPhrases Handler
#[derive(Default)]
pub struct ListPhrasesHandler;

impl ListPhrasesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListPhrases) -> Result<Vec<&'static str>, ApplicationError> {
        Ok(QUICK_PHRASES.to_vec())
    }
}
