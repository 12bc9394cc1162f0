//! Speech Generator Port - 外部 TTS 模型抽象
//!
//! 具体实现在 infrastructure/adapters/tts

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::{AudioPayload, VoiceName};

/// 语音生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No audio data received from TTS service")]
    NoAudio,
}

/// 语音生成请求
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// 用户输入的原始文本
    pub text: String,
    /// 预置音色
    pub voice: VoiceName,
}

/// Speech Generator Port
///
/// 可能很慢，也可能失败；缓存层从不直接调用，由编排层调用后写入缓存
#[async_trait]
pub trait SpeechGeneratorPort: Send + Sync {
    /// 生成语音，返回 base64 音频
    async fn generate(&self, request: GenerateRequest) -> Result<AudioPayload, GenerationError>;
}
