//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TTS_PROVIDERS};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// API key 的备用环境变量
const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOCALREST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOCALREST_SERVER__PORT=8080`
/// - `VOCALREST_TTS__PROVIDER=fake`
/// - `VOCALREST_CACHE__PATH=/data/cache.sled`
/// - `GEMINI_API_KEY=...`（未设置 `VOCALREST_TTS__API_KEY` 时使用）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("tts.provider", "gemini")?
        .set_default("tts.url", "https://generativelanguage.googleapis.com")?
        .set_default("tts.model", "gemini-2.5-flash-preview-tts")?
        .set_default("tts.timeout_secs", 60)?
        .set_default("tts.sample_rate", 24000)?
        .set_default("cache.path", "data/vocalrest_cache.sled")?
        .set_default("cache.enabled", true)?
        .set_default("history.limit", 30)?
        .set_default("debug_log.capacity", 50)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOCALREST_TTS__MODEL=gemini-2.5-pro-preview-tts
    builder = builder.add_source(
        Environment::with_prefix("VOCALREST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    if app_config.tts.api_key.is_none() {
        app_config.tts.api_key = std::env::var(API_KEY_FALLBACK_ENV)
            .ok()
            .filter(|key| !key.is_empty());
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if !TTS_PROVIDERS.contains(&config.tts.provider.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "Unknown TTS provider: {} (expected one of {:?})",
            config.tts.provider, TTS_PROVIDERS
        )));
    }

    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model cannot be empty".to_string(),
        ));
    }

    if config.cache.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache path cannot be empty".to_string(),
        ));
    }

    if config.history.limit == 0 {
        return Err(ConfigError::ValidationError(
            "History limit cannot be 0".to_string(),
        ));
    }

    if config.debug_log.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "Debug log capacity cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("TTS Provider: {}", config.tts.provider);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Model: {}", config.tts.model);
    tracing::info!("TTS API Key: {}", if config.tts.api_key.is_some() { "set" } else { "missing" });
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    if config.cache.enabled {
        tracing::info!("Cache: {}", config.cache.path);
    } else {
        tracing::info!("Cache: in-memory");
    }
    tracing::info!("History Limit: {}", config.history.limit);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
