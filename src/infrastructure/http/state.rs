//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ClearHistoryHandler, GenerateSpeechHandler, SelectVoiceHandler, SpeakHandler,
    // Query handlers
    GetAudioHandler, GetCacheStatusHandler, GetSelectedVoiceHandler, ListHistoryHandler,
    ListPhrasesHandler, ListVoicesHandler,
    // Ports
    AudioCachePort, PlaybackSinkPort, SpeechGeneratorPort, VoicePreferencePort,
};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::memory::DebugLog;

/// 状态构建参数
#[derive(Debug, Clone)]
pub struct StateSettings {
    /// 历史记录上限
    pub history_limit: usize,
    /// 生成音频的采样率（用于 WAV 封装）
    pub sample_rate: u32,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            history_limit: crate::application::DEFAULT_HISTORY_LIMIT,
            sample_rate: 24000,
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub audio_cache: Arc<dyn AudioCachePort>,
    pub playback_sink: Arc<dyn PlaybackSinkPort>,
    pub event_publisher: Arc<EventPublisher>,
    pub debug_log: Arc<DebugLog>,
    pub settings: StateSettings,

    // ========== Command Handlers ==========
    pub speak_handler: SpeakHandler,
    pub generate_speech_handler: GenerateSpeechHandler,
    pub clear_history_handler: ClearHistoryHandler,
    pub select_voice_handler: SelectVoiceHandler,

    // ========== Query Handlers ==========
    pub list_history_handler: ListHistoryHandler,
    pub get_audio_handler: GetAudioHandler,
    pub cache_status_handler: GetCacheStatusHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub selected_voice_handler: GetSelectedVoiceHandler,
    pub list_phrases_handler: ListPhrasesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        audio_cache: Arc<dyn AudioCachePort>,
        speech_generator: Arc<dyn SpeechGeneratorPort>,
        playback_sink: Arc<dyn PlaybackSinkPort>,
        voice_preference: Arc<dyn VoicePreferencePort>,
        event_publisher: Arc<EventPublisher>,
        debug_log: Arc<DebugLog>,
        settings: StateSettings,
    ) -> Self {
        Self {
            // Command handlers
            speak_handler: SpeakHandler::new(
                audio_cache.clone(),
                speech_generator.clone(),
                playback_sink.clone(),
                voice_preference.clone(),
                debug_log.clone(),
            ),
            generate_speech_handler: GenerateSpeechHandler::new(speech_generator),
            clear_history_handler: ClearHistoryHandler::new(audio_cache.clone(), debug_log.clone()),
            select_voice_handler: SelectVoiceHandler::new(voice_preference.clone()),

            // Query handlers
            list_history_handler: ListHistoryHandler::new(
                audio_cache.clone(),
                settings.history_limit,
            ),
            get_audio_handler: GetAudioHandler::new(audio_cache.clone()),
            cache_status_handler: GetCacheStatusHandler::new(audio_cache.clone()),
            list_voices_handler: ListVoicesHandler::new(),
            selected_voice_handler: GetSelectedVoiceHandler::new(voice_preference),
            list_phrases_handler: ListPhrasesHandler::new(),

            // Ports
            audio_cache,
            playback_sink,
            event_publisher,
            debug_log,
            settings,
        }
    }
}
