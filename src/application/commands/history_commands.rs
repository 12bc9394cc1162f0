//! History Commands - 历史记录命令

/// 清空历史（同时清空音频缓存）
#[derive(Debug, Clone, Default)]
pub struct ClearHistoryCommand;
