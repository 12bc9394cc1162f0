//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（音频缓存、语音生成、播放输出、音色偏好）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Speak commands
    AudioSource,
    GenerateSpeechCommand,
    GenerateSpeechResponse,
    SpeakCommand,
    SpeakResponse,
    // History commands
    ClearHistoryCommand,
    // Voice commands
    SelectVoiceCommand,
    SelectVoiceResponse,
    // Handlers
    handlers::{ClearHistoryHandler, GenerateSpeechHandler, SelectVoiceHandler, SpeakHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio cache
    AudioCachePort,
    CacheEntry,
    CacheError,
    MonotonicClock,
    StoreState,
    // Playback
    PlaybackError,
    PlaybackRequest,
    PlaybackSinkPort,
    // Speech generator
    GenerateRequest,
    GenerationError,
    SpeechGeneratorPort,
    // Voice preference
    VoicePreferencePort,
};

pub use queries::{
    // Audio queries
    GetAudioQuery,
    GetAudioResponse,
    // History queries
    CacheStatusResponse,
    GetCacheStatus,
    HistoryItem,
    ListHistory,
    // Voice queries
    GetSelectedVoice,
    ListPhrases,
    ListVoices,
    // Handlers
    handlers::{
        GetAudioHandler, GetCacheStatusHandler, GetSelectedVoiceHandler, ListHistoryHandler,
        ListPhrasesHandler, ListVoicesHandler, DEFAULT_HISTORY_LIMIT,
    },
};
