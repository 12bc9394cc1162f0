//! Voice Preference Port - 音色偏好持久化

use async_trait::async_trait;

use super::CacheError;
use crate::domain::speech::VoiceName;

/// Voice Preference Port
///
/// 与音频缓存共用同一个持久化存储，失败策略相同：读取失败视为未设置
#[async_trait]
pub trait VoicePreferencePort: Send + Sync {
    /// 读取已保存的音色，未设置或值无效时返回 None
    async fn load(&self) -> Option<VoiceName>;

    /// 保存音色
    async fn save(&self, voice: VoiceName) -> Result<(), CacheError>;
}
