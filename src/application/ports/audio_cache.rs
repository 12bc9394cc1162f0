//! Audio Cache Port - 音频缓存管理
//!
//! 以归一化文本为主键的持久化缓存，带 last_used 二级索引（用于历史记录）
//!
//! 失败策略:
//! - get / list_recent: 存储不可用或读取失败时视为未命中，不返回错误
//! - put: 返回错误仅供记录日志，调用方不应因此中断播放
//! - clear_all: 用户主动操作，错误必须向上传递

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Cache store IO error: {0}")]
    StoreIo(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Failed to clear cache: {0}")]
    ClearFailed(String),
}

/// 缓存存储状态
///
/// `Closed -> Opening -> Ready`，打开失败时 `Opening -> Failed`。
/// `Ready` 与 `Failed` 在本次进程内均为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreState {
    Closed,
    Opening,
    Ready,
    Failed,
}

impl StoreState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

/// 缓存条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// 归一化文本（主键）
    pub normalized_key: String,
    /// 最近一次生成/命中时的原始文本
    pub original_text: String,
    /// base64 音频数据
    pub audio_payload: String,
    /// 生成该音频时使用的音色
    pub voice_id: String,
    /// 最近使用时间（Unix 毫秒，单调递增）
    pub last_used: i64,
}

/// Audio Cache Port
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// 按归一化 key 查找，不修改任何状态
    async fn get(&self, key: &str) -> Option<CacheEntry>;

    /// 写入或覆盖条目，last_used 设为当前时间
    async fn put(
        &self,
        key: &str,
        original_text: &str,
        audio_payload: &str,
        voice_id: &str,
    ) -> Result<(), CacheError>;

    /// 按 last_used 倒序列出最多 limit 条
    async fn list_recent(&self, limit: usize) -> Vec<CacheEntry>;

    /// 清空所有条目
    async fn clear_all(&self) -> Result<(), CacheError>;

    /// 当前存储状态
    fn state(&self) -> StoreState;

    /// 条目数量（存储不可用时为 0）
    async fn len(&self) -> usize;
}

/// 单调时钟
///
/// 同一毫秒内的连续写入会被顺延 1ms，保证 last_used 严格递增
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: std::sync::atomic::AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有的最大时间戳为起点
    pub fn starting_at(last: i64) -> Self {
        Self {
            last: std::sync::atomic::AtomicI64::new(last),
        }
    }

    /// 取下一个时间戳
    pub fn next(&self) -> i64 {
        use std::sync::atomic::Ordering;

        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
