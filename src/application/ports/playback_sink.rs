//! Playback Sink Port - 播放输出抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::{AudioPayload, VoiceName};

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Playback sink closed")]
    Closed,
}

/// 播放请求
#[derive(Debug, Clone)]
pub struct PlaybackRequest {
    /// 展示用文本
    pub text: String,
    pub voice: VoiceName,
    pub payload: AudioPayload,
}

/// Playback Sink Port
///
/// 同一时间只播放一段音频，新的 play 之前调用方会先 stop
#[async_trait]
pub trait PlaybackSinkPort: Send + Sync {
    /// 开始播放，返回播放 ID
    async fn play(&self, request: PlaybackRequest) -> Result<String, PlaybackError>;

    /// 停止当前播放（没有播放时为空操作）
    async fn stop(&self);
}
