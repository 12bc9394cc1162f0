//! Audio Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::GetAudioQuery;
use crate::infrastructure::adapters::{wrap_pcm_as_wav, PcmFormat};
use crate::infrastructure::http::dto::GetAudioRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 下载已缓存的音频，PCM 封装为 WAV
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetAudioRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .get_audio_handler
        .handle(GetAudioQuery { text: req.text })
        .await?;

    let pcm = result
        .audio
        .decode()
        .map_err(|e| ApiError::Internal(format!("Cached audio is corrupt: {}", e)))?;
    let wav = wrap_pcm_as_wav(&pcm, PcmFormat::mono_16bit(state.settings.sample_rate));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, wav.len())
        .body(Body::from(wav))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
