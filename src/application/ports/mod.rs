//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod playback_sink;
mod speech_generator;
mod voice_preference;

pub use audio_cache::{AudioCachePort, CacheEntry, CacheError, MonotonicClock, StoreState};
pub use playback_sink::{PlaybackError, PlaybackRequest, PlaybackSinkPort};
pub use speech_generator::{GenerateRequest, GenerationError, SpeechGeneratorPort};
pub use voice_preference::VoicePreferencePort;
