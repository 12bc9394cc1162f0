//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{AudioSource, SelectVoiceResponse, SpeakResponse};
use crate::domain::speech::VoiceName;

use super::error::ApiError;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

/// 解析请求中的音色名
pub fn parse_voice(voice: &str) -> Result<VoiceName, ApiError> {
    voice
        .parse::<VoiceName>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpeakResponseDto {
    pub normalized_text: String,
    pub text: String,
    pub voice: String,
    pub source: AudioSource,
    pub played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_id: Option<String>,
    /// base64 PCM
    pub audio: String,
}

impl From<SpeakResponse> for SpeakResponseDto {
    fn from(response: SpeakResponse) -> Self {
        Self {
            normalized_text: response.normalized_text,
            text: response.text,
            voice: response.voice,
            source: response.source,
            played: response.played,
            playback_id: response.playback_id,
            audio: response.audio.into_inner(),
        }
    }
}

/// 字段缺失时返回统一的校验错误
#[derive(Debug, Deserialize)]
pub struct GenerateSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSpeechResponseDto {
    pub audio: String,
}

#[derive(Debug, Deserialize)]
pub struct GetAudioRequest {
    pub text: String,
}

// ============================================================================
// History DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectVoiceRequest {
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct SelectedVoiceDto {
    pub voice: VoiceName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

impl From<SelectVoiceResponse> for SelectedVoiceDto {
    fn from(response: SelectVoiceResponse) -> Self {
        Self {
            voice: response.voice,
            persisted: Some(response.persisted),
        }
    }
}
