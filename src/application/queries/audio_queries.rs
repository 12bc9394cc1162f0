//! Audio Queries - 音频查询

use crate::domain::speech::AudioPayload;

/// 按文本获取已缓存的音频
#[derive(Debug, Clone)]
pub struct GetAudioQuery {
    /// 原始文本，查询前会归一化
    pub text: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetAudioResponse {
    pub normalized_text: String,
    pub voice: String,
    pub audio: AudioPayload,
}
