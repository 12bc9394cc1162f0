//! Voice Commands - 音色命令

use crate::domain::speech::VoiceName;

/// 选择音色
#[derive(Debug, Clone)]
pub struct SelectVoiceCommand {
    pub voice: VoiceName,
}

/// 选择音色响应
#[derive(Debug, Clone)]
pub struct SelectVoiceResponse {
    pub voice: VoiceName,
    /// 偏好是否已持久化
    pub persisted: bool,
}
