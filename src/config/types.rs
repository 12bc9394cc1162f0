//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音频缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 历史记录配置
    #[serde(default)]
    pub history: HistoryConfig,

    /// 调试日志配置
    #[serde(default)]
    pub debug_log: DebugLogConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 支持的语音生成服务
pub const TTS_PROVIDERS: &[&str] = &["gemini", "fake"];

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 语音生成服务: gemini | fake
    #[serde(default = "default_tts_provider")]
    pub provider: String,

    /// API 基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 模型名称
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// API key，未设置时读取 GEMINI_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 风格指令，未设置时使用内置指令
    #[serde(default)]
    pub style_prompt: Option<String>,

    /// 返回 PCM 的采样率
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_tts_provider() -> String {
    "gemini".to_string()
}

fn default_tts_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

fn default_sample_rate() -> u32 {
    24000
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: default_tts_provider(),
            url: default_tts_url(),
            model: default_tts_model(),
            api_key: None,
            timeout_secs: default_tts_timeout(),
            style_prompt: None,
            sample_rate: default_sample_rate(),
        }
    }
}

/// 音频缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// sled 数据目录
    #[serde(default = "default_cache_path")]
    pub path: String,

    /// 关闭时使用内存缓存，重启后丢失
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
}

fn default_cache_path() -> String {
    "data/vocalrest_cache.sled".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            enabled: default_cache_enabled(),
        }
    }
}

/// 历史记录配置
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// 最多返回条数
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    30
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// 调试日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct DebugLogConfig {
    /// 保留条数
    #[serde(default = "default_debug_log_capacity")]
    pub capacity: usize,
}

fn default_debug_log_capacity() -> usize {
    50
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            capacity: default_debug_log_capacity(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
