//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetSelectedVoice, ListPhrases, ListVoices, SelectVoiceCommand};
use crate::domain::speech::VoiceOption;
use crate::infrastructure::http::dto::{
    parse_voice, ApiResponse, SelectVoiceRequest, SelectedVoiceDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VoiceOption>>>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;
    Ok(Json(ApiResponse::success(voices)))
}

/// 当前选择的音色
pub async fn selected_voice(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SelectedVoiceDto>>, ApiError> {
    let voice = state.selected_voice_handler.handle(GetSelectedVoice).await?;
    Ok(Json(ApiResponse::success(SelectedVoiceDto {
        voice,
        persisted: None,
    })))
}

/// 选择音色
pub async fn select_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectVoiceRequest>,
) -> Result<Json<ApiResponse<SelectedVoiceDto>>, ApiError> {
    let voice = parse_voice(&req.voice)?;
    let response = state
        .select_voice_handler
        .handle(SelectVoiceCommand { voice })
        .await?;

    Ok(Json(ApiResponse::success(response.into())))
}

/// 常用语
pub async fn list_phrases(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<&'static str>>>, ApiError> {
    let phrases = state.list_phrases_handler.handle(ListPhrases).await?;
    Ok(Json(ApiResponse::success(phrases)))
}
