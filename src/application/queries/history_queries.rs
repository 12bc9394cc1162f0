//! History Queries - 历史记录查询

use serde::Serialize;

use crate::application::ports::StoreState;

/// 最近朗读记录查询
#[derive(Debug, Clone, Default)]
pub struct ListHistory {
    /// 未指定时使用配置的上限
    pub limit: Option<usize>,
}

/// 历史记录条目
#[derive(Debug, Clone, Serialize)]
pub struct HistoryItem {
    /// last_used 的字符串形式
    pub id: String,
    pub text: String,
    pub timestamp: i64,
}

/// 缓存状态查询
#[derive(Debug, Clone, Default)]
pub struct GetCacheStatus;

/// 缓存状态
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatusResponse {
    pub state: StoreState,
    pub entries: usize,
}
