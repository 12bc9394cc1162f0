//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("文本不能为空")]
    EmptyText,

    #[error("未知音色: {0}")]
    UnknownVoice(String),

    #[error("无效的音频数据: {0}")]
    InvalidPayload(String),
}
