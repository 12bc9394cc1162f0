//! Speak Commands - 朗读相关命令

use serde::Serialize;

use crate::domain::speech::{AudioPayload, VoiceName};

/// 朗读命令
#[derive(Debug, Clone)]
pub struct SpeakCommand {
    pub text: String,
    /// 未指定时使用已保存的音色偏好
    pub voice: Option<VoiceName>,
}

/// 音频来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Cache,
    Generated,
}

/// 朗读响应
#[derive(Debug, Clone)]
pub struct SpeakResponse {
    pub normalized_text: String,
    pub text: String,
    /// 实际音频对应的音色（缓存命中时为生成时的音色）
    pub voice: String,
    pub source: AudioSource,
    /// 被更新的请求打断时为 false
    pub played: bool,
    pub playback_id: Option<String>,
    pub audio: AudioPayload,
}

/// 直接生成语音命令（不读写缓存）
#[derive(Debug, Clone)]
pub struct GenerateSpeechCommand {
    pub text: String,
    pub voice: VoiceName,
}

/// 直接生成语音响应
#[derive(Debug, Clone)]
pub struct GenerateSpeechResponse {
    pub audio: AudioPayload,
}
