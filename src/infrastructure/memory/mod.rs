//! In-Memory Implementations
//!
//! 内存实现：音频缓存与音色偏好（测试/禁用持久化时使用）、调试日志缓冲区

mod audio_cache;
mod debug_log;
mod voice_preference;

pub use audio_cache::InMemoryAudioCache;
pub use debug_log::{DebugLevel, DebugLog, DebugLogEntry, DEFAULT_DEBUG_LOG_CAPACITY};
pub use voice_preference::InMemoryVoicePreference;
