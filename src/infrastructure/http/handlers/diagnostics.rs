//! Diagnostics Handlers - 调试日志与缓存状态

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{CacheStatusResponse, GetCacheStatus};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::memory::DebugLogEntry;

/// 最近的调试日志（最旧在前）
pub async fn debug_logs(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<DebugLogEntry>>> {
    Json(ApiResponse::success(state.debug_log.entries()))
}

/// 缓存存储状态
pub async fn cache_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CacheStatusResponse>>, ApiError> {
    let status = state.cache_status_handler.handle(GetCacheStatus).await?;
    Ok(Json(ApiResponse::success(status)))
}
