//! Sled 嵌入式存储：音频缓存与偏好设置

mod audio_cache;
mod database;
mod voice_preference;

pub use audio_cache::SledAudioCache;
pub use database::{SledCacheConfig, SledDatabase, SCHEMA_VERSION};
pub use voice_preference::SledVoicePreference;
