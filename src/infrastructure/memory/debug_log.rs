//! In-Memory Debug Log
//!
//! 环形缓冲区，保留最近 N 条编排层日志，供客户端调试面板展示。
//! 每条记录同时写入 tracing。

use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 默认保留条数
pub const DEFAULT_DEBUG_LOG_CAPACITY: usize = 50;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Log,
    Warn,
    Error,
}

/// 调试日志条目
#[derive(Debug, Clone, Serialize)]
pub struct DebugLogEntry {
    /// 本地时间 HH:MM:SS
    pub time: String,
    pub message: String,
    #[serde(rename = "type")]
    pub level: DebugLevel,
}

/// 调试日志缓冲区
pub struct DebugLog {
    capacity: usize,
    entries: Mutex<VecDeque<DebugLogEntry>>,
}

impl DebugLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "vocalrest::debug", "{}", message);
        self.push(message, DebugLevel::Log);
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: "vocalrest::debug", "{}", message);
        self.push(message, DebugLevel::Warn);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(target: "vocalrest::debug", "{}", message);
        self.push(message, DebugLevel::Error);
    }

    /// 按时间顺序返回所有条目（最旧在前）
    pub fn entries(&self) -> Vec<DebugLogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.iter().cloned().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn push(&self, message: String, level: DebugLevel) {
        let entry = DebugLogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            message,
            level,
        };

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new(DEFAULT_DEBUG_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_entries_only() {
        let log = DebugLog::new(3);
        for i in 0..5 {
            log.log(format!("message {}", i));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "message 2");
        assert_eq!(entries[2].message, "message 4");
    }

    #[test]
    fn test_levels_recorded() {
        let log = DebugLog::default();
        log.log("a");
        log.warn("b");
        log.error("c");

        let levels: Vec<_> = log.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![DebugLevel::Log, DebugLevel::Warn, DebugLevel::Error]);
        assert_eq!(log.capacity(), DEFAULT_DEBUG_LOG_CAPACITY);
    }

    #[test]
    fn test_entry_serializes_level_as_type() {
        let log = DebugLog::default();
        log.warn("careful");

        let json = serde_json::to_value(&log.entries()[0]).unwrap();
        assert_eq!(json["type"], "warn");
        assert_eq!(json["message"], "careful");
    }
}
