//! Sled Database - 延迟打开的共享数据库句柄
//!
//! 布局:
//! - `audio_cache`           归一化文本 -> bincode(StoredEntry)
//! - `audio_cache.last_used` [8 字节可排序 last_used][归一化文本] -> 空
//! - `preferences`           偏好设置（如已选音色）
//! - `meta`                  `schema_version` -> u32 大端
//!
//! schema 版本不一致时直接丢弃缓存数据重建，不做迁移。
//!
//! 状态机: `Closed -> Opening -> Ready | Failed`。首次访问时打开，
//! 并发的首次访问通过 OnceCell 汇聚到同一个连接。

use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::application::ports::{CacheError, MonotonicClock, StoreState};

/// 当前 schema 版本
pub const SCHEMA_VERSION: u32 = 1;

pub(super) const ENTRIES_TREE: &str = "audio_cache";
pub(super) const RECENCY_TREE: &str = "audio_cache.last_used";
pub(super) const PREFERENCES_TREE: &str = "preferences";
pub(super) const META_TREE: &str = "meta";
pub(super) const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Sled 缓存配置
#[derive(Debug, Clone)]
pub struct SledCacheConfig {
    /// 数据库路径
    pub db_path: String,
    /// 是否启用持久化缓存，禁用时所有操作视为存储不可用
    pub enabled: bool,
}

impl Default for SledCacheConfig {
    fn default() -> Self {
        Self {
            db_path: "data/vocalrest_cache.sled".to_string(),
            enabled: true,
        }
    }
}

/// 持久化的缓存条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct StoredEntry {
    pub original_text: String,
    pub audio_payload: String,
    pub voice_id: String,
    pub last_used: i64,
}

/// 已打开的存储
pub(super) struct OpenStore {
    pub db: Db,
    pub entries: Tree,
    pub recency: Tree,
    pub preferences: Tree,
    pub clock: MonotonicClock,
}

/// 构造 recency 索引 key
///
/// 翻转符号位后大端编码，字节序与数值序一致
pub(super) fn recency_key(last_used: i64, key: &str) -> Vec<u8> {
    let ordered = (last_used as u64) ^ (1 << 63);
    let mut bytes = Vec::with_capacity(8 + key.len());
    bytes.extend_from_slice(&ordered.to_be_bytes());
    bytes.extend_from_slice(key.as_bytes());
    bytes
}

/// 解析 recency 索引 key
pub(super) fn parse_recency_key(bytes: &[u8]) -> Option<(i64, String)> {
    if bytes.len() < 8 {
        return None;
    }
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&bytes[..8]);
    let last_used = (u64::from_be_bytes(ts) ^ (1 << 63)) as i64;
    let key = String::from_utf8(bytes[8..].to_vec()).ok()?;
    Some((last_used, key))
}

const STATE_CLOSED: u8 = 0;
const STATE_OPENING: u8 = 1;
const STATE_READY: u8 = 2;
const STATE_FAILED: u8 = 3;

/// Sled 数据库句柄
pub struct SledDatabase {
    config: SledCacheConfig,
    state: AtomicU8,
    store: OnceCell<Option<OpenStore>>,
}

impl SledDatabase {
    pub fn new(config: SledCacheConfig) -> Self {
        Self {
            config,
            state: AtomicU8::new(STATE_CLOSED),
            store: OnceCell::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前状态
    pub fn state(&self) -> StoreState {
        match self.state.load(Ordering::Acquire) {
            STATE_OPENING => StoreState::Opening,
            STATE_READY => StoreState::Ready,
            STATE_FAILED => StoreState::Failed,
            _ => StoreState::Closed,
        }
    }

    /// 确保数据库已打开（已打开时为空操作）
    pub async fn open(&self) -> StoreState {
        let _ = self.store().await;
        self.state()
    }

    /// 获取已打开的存储，不可用时返回 None
    pub(super) async fn store(&self) -> Option<&OpenStore> {
        self.store
            .get_or_init(|| async {
                self.state.store(STATE_OPENING, Ordering::Release);

                if !self.config.enabled {
                    tracing::warn!("Audio cache disabled by configuration");
                    self.state.store(STATE_FAILED, Ordering::Release);
                    return None;
                }

                let db_path = self.config.db_path.clone();
                let opened = tokio::task::spawn_blocking(move || open_store(&db_path))
                    .await
                    .map_err(|e| CacheError::StoreUnavailable(e.to_string()))
                    .and_then(|result| result);

                match opened {
                    Ok(store) => {
                        tracing::info!(db_path = %self.config.db_path, "Audio cache store ready");
                        self.state.store(STATE_READY, Ordering::Release);
                        Some(store)
                    }
                    Err(e) => {
                        tracing::error!(
                            db_path = %self.config.db_path,
                            error = %e,
                            "Failed to open audio cache store, caching disabled"
                        );
                        self.state.store(STATE_FAILED, Ordering::Release);
                        None
                    }
                }
            })
            .await
            .as_ref()
    }

    /// 刷新数据库
    pub async fn flush(&self) -> Result<(), CacheError> {
        let store = self
            .store()
            .await
            .ok_or_else(|| CacheError::StoreUnavailable("store not open".to_string()))?;
        store
            .db
            .flush_async()
            .await
            .map_err(|e| CacheError::StoreIo(e.to_string()))?;
        Ok(())
    }
}

fn io_error(e: sled::Error) -> CacheError {
    CacheError::StoreIo(e.to_string())
}

/// 打开数据库并检查 schema 版本
fn open_store(db_path: &str) -> Result<OpenStore, CacheError> {
    let db = sled::open(db_path).map_err(|e| CacheError::StoreUnavailable(e.to_string()))?;
    let meta = db.open_tree(META_TREE).map_err(io_error)?;

    let stored_version = meta
        .get(SCHEMA_VERSION_KEY)
        .map_err(io_error)?
        .and_then(|v| <[u8; 4]>::try_from(&v[..]).ok())
        .map(u32::from_be_bytes);

    if stored_version != Some(SCHEMA_VERSION) {
        if let Some(old) = stored_version {
            tracing::warn!(
                old_version = old,
                new_version = SCHEMA_VERSION,
                "Audio cache schema changed, rebuilding"
            );
        }
        db.drop_tree(ENTRIES_TREE).map_err(io_error)?;
        db.drop_tree(RECENCY_TREE).map_err(io_error)?;
        meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION.to_be_bytes().to_vec())
            .map_err(io_error)?;
        meta.flush().map_err(io_error)?;
    }

    let entries = db.open_tree(ENTRIES_TREE).map_err(io_error)?;
    let recency = db.open_tree(RECENCY_TREE).map_err(io_error)?;
    let preferences = db.open_tree(PREFERENCES_TREE).map_err(io_error)?;

    // 时钟从索引中最大的 last_used 继续
    let latest = recency
        .last()
        .map_err(io_error)?
        .and_then(|(k, _)| parse_recency_key(&k))
        .map(|(last_used, _)| last_used)
        .unwrap_or(0);

    tracing::debug!(
        entries = entries.len(),
        latest_used = latest,
        "Audio cache store opened"
    );

    Ok(OpenStore {
        db,
        entries,
        recency,
        preferences,
        clock: MonotonicClock::starting_at(latest),
    })
}
