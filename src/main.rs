//! VocalRest - 带音频缓存的文本朗读服务
//!
//! - Domain: 文本归一化, speech/
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, memory, adapters, events

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vocalrest::application::{AudioCachePort, SpeechGeneratorPort, VoicePreferencePort};
use vocalrest::config::{load_config, print_config, AppConfig};
use vocalrest::infrastructure::adapters::{
    FakeTtsClient, FakeTtsClientConfig, GeminiTtsClient, GeminiTtsClientConfig,
    DEFAULT_STYLE_PROMPT, WsPlaybackSink,
};
use vocalrest::infrastructure::events::EventPublisher;
use vocalrest::infrastructure::http::{AppState, HttpServer, ServerConfig, StateSettings};
use vocalrest::infrastructure::memory::{DebugLog, InMemoryAudioCache, InMemoryVoicePreference};
use vocalrest::infrastructure::persistence::sled::{
    SledAudioCache, SledCacheConfig, SledDatabase, SledVoicePreference,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},vocalrest={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("VocalRest - 文本朗读服务");
    print_config(&config);

    let speech_generator = create_speech_generator(&config)?;

    // 音频缓存与音色偏好
    let (audio_cache, voice_preference, database): (
        Arc<dyn AudioCachePort>,
        Arc<dyn VoicePreferencePort>,
        Option<Arc<SledDatabase>>,
    ) = if config.cache.enabled {
        if let Some(parent) = std::path::Path::new(&config.cache.path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let database = SledDatabase::new(SledCacheConfig {
            db_path: config.cache.path.clone(),
            enabled: true,
        })
        .arc();

        // 后台预热，首个请求无需等待打开
        let warm = database.clone();
        tokio::spawn(async move {
            let state = warm.open().await;
            tracing::info!(state = state.as_str(), "Audio cache store opened");
        });

        let audio_cache: Arc<dyn AudioCachePort> = SledAudioCache::new(database.clone()).arc();
        let voice_preference: Arc<dyn VoicePreferencePort> =
            Arc::new(SledVoicePreference::new(database.clone()));
        (audio_cache, voice_preference, Some(database))
    } else {
        tracing::warn!("Persistent cache disabled, using in-memory cache");
        let audio_cache: Arc<dyn AudioCachePort> = InMemoryAudioCache::new().arc();
        let voice_preference: Arc<dyn VoicePreferencePort> =
            Arc::new(InMemoryVoicePreference::new());
        (audio_cache, voice_preference, None)
    };

    // 事件发布与播放输出
    let event_publisher = EventPublisher::new().arc();
    let playback_sink = Arc::new(WsPlaybackSink::new(
        event_publisher.clone(),
        config.tts.sample_rate,
    ));
    let debug_log = DebugLog::new(config.debug_log.capacity).arc();

    let state = AppState::new(
        audio_cache,
        speech_generator,
        playback_sink,
        voice_preference,
        event_publisher,
        debug_log,
        StateSettings {
            history_limit: config.history.limit,
            sample_rate: config.tts.sample_rate,
        },
    );

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    if let Some(database) = database {
        if let Err(e) = database.flush().await {
            tracing::warn!(error = %e, "Failed to flush audio cache on shutdown");
        }
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 按配置创建语音生成器
fn create_speech_generator(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechGeneratorPort>> {
    match config.tts.provider.as_str() {
        "fake" => {
            tracing::warn!("Using fake TTS provider, audio is synthetic");
            Ok(Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default())))
        }
        _ => {
            if config.tts.api_key.is_none() {
                tracing::warn!("TTS API key not set, speech generation will fail");
            }
            let client = GeminiTtsClient::new(GeminiTtsClientConfig {
                base_url: config.tts.url.clone(),
                model: config.tts.model.clone(),
                api_key: config.tts.api_key.clone(),
                timeout_secs: config.tts.timeout_secs,
                style_prompt: config
                    .tts
                    .style_prompt
                    .clone()
                    .unwrap_or_else(|| DEFAULT_STYLE_PROMPT.to_string()),
            })?;
            Ok(Arc::new(client))
        }
    }
}
