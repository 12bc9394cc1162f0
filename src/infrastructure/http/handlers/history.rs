//! History HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ClearHistoryCommand, HistoryItem, ListHistory};
use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::dto::{ApiResponse, Empty, HistoryParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 最近朗读记录
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<Vec<HistoryItem>>>, ApiError> {
    let items = state
        .list_history_handler
        .handle(ListHistory {
            limit: params.limit,
        })
        .await?;

    Ok(Json(ApiResponse::success(items)))
}

/// 清空历史（同时清空音频缓存）
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .clear_history_handler
        .handle(ClearHistoryCommand)
        .await?;

    state.event_publisher.publish(WsEvent::HistoryCleared);

    Ok(Json(ApiResponse::ok()))
}
