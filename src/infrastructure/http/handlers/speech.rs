//! Speech HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GenerateSpeechCommand, SpeakCommand};
use crate::infrastructure::http::dto::{
    parse_voice, ApiResponse, GenerateSpeechRequest, GenerateSpeechResponseDto, SpeakRequest,
    SpeakResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 朗读文本
///
/// 客户端断开不会中断生成，生成的音频仍会写入缓存
pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Result<Json<ApiResponse<SpeakResponseDto>>, ApiError> {
    let voice = req.voice.as_deref().map(parse_voice).transpose()?;

    let response = state
        .speak_handler
        .handle(SpeakCommand {
            text: req.text,
            voice,
        })
        .await?;

    Ok(Json(ApiResponse::success(response.into())))
}

/// 直接生成语音
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateSpeechRequest>,
) -> Result<Json<ApiResponse<GenerateSpeechResponseDto>>, ApiError> {
    let (text, voice) = match (req.text, req.voice) {
        (Some(text), Some(voice)) if !text.is_empty() && !voice.is_empty() => (text, voice),
        _ => {
            return Err(ApiError::BadRequest(
                "Text and voice are required".to_string(),
            ))
        }
    };
    let voice = parse_voice(&voice)?;

    let response = state
        .generate_speech_handler
        .handle(GenerateSpeechCommand { text, voice })
        .await?;

    Ok(Json(ApiResponse::success(GenerateSpeechResponseDto {
        audio: response.audio.into_inner(),
    })))
}
