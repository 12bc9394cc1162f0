//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 开始播放
    PlaybackStarted {
        playback_id: String,
        text: String,
        voice: String,
        /// base64 PCM
        audio: String,
        sample_rate: u32,
        byte_len: usize,
        /// 按 16-bit 单声道估算的时长
        duration_ms: u64,
    },
    /// 播放被停止（被新的播放打断或主动停止）
    PlaybackStopped { playback_id: String },
    /// 历史已清空
    HistoryCleared,
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.channel.subscribe()
    }

    /// 发布事件（没有订阅者时丢弃）
    pub fn publish(&self, event: WsEvent) {
        match self.channel.send(event) {
            Ok(receivers) => {
                tracing::debug!(receivers = receivers, "Event published");
            }
            Err(_) => {
                tracing::trace!("No subscribers, event dropped");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
