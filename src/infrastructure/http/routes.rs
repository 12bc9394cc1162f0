//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/speak             POST  朗读（优先使用缓存）
//! - /api/generate-speech   POST  直接生成语音（不读写缓存）
//! - /api/audio             POST  下载已缓存的音频（WAV）
//! - /api/history           GET   最近朗读记录
//! - /api/history/clear     POST  清空历史与音频缓存
//! - /api/voice/list        GET   列出所有音色
//! - /api/voice/selected    GET   当前音色
//! - /api/voice/select      POST  选择音色
//! - /api/phrases           GET   常用语
//! - /api/debug/logs        GET   调试日志
//! - /api/cache/status      GET   缓存状态
//! - /ws/playback           WS    播放事件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/playback", get(handlers::playback_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/speak", post(handlers::speak))
        .route("/generate-speech", post(handlers::generate_speech))
        .route("/audio", post(handlers::get_audio))
        .route("/phrases", get(handlers::list_phrases))
        .route("/debug/logs", get(handlers::debug_logs))
        .route("/cache/status", get(handlers::cache_status))
        .route("/history", get(handlers::list_history))
        .route("/history/clear", post(handlers::clear_history))
        .nest("/voice", voice_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voices))
        .route("/selected", get(handlers::selected_voice))
        .route("/select", post(handlers::select_voice))
}
