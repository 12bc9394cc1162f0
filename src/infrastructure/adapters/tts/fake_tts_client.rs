//! Fake TTS Client - 用于测试和离线运行的语音生成器
//!
//! 不调用外部服务，返回由文本和音色决定的固定音频

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{GenerateRequest, GenerationError, SpeechGeneratorPort};
use crate::domain::speech::AudioPayload;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 模拟生成延迟
    pub delay_ms: u64,
    /// 为 true 时所有请求失败
    pub fail: bool,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200,
            fail: false,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(delay_ms = config.delay_ms, "FakeTtsClient initialized");
        Self {
            config,
            calls: AtomicUsize::new(0),
        }
    }

    /// 无延迟
    pub fn instant() -> Self {
        Self::new(FakeTtsClientConfig {
            delay_ms: 0,
            fail: false,
        })
    }

    /// 总是失败
    pub fn failing() -> Self {
        Self::new(FakeTtsClientConfig {
            delay_ms: 0,
            fail: true,
        })
    }

    /// 已收到的生成请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 给定请求对应的音频（16-bit PCM，每个字节扩展为一个采样）
    pub fn payload_for(request: &GenerateRequest) -> AudioPayload {
        let seed = format!("{}|{}", request.voice, request.text);
        let pcm: Vec<u8> = seed
            .bytes()
            .flat_map(|b| (i16::from(b) << 6).to_le_bytes())
            .collect();
        AudioPayload::from_bytes(&pcm)
    }
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl SpeechGeneratorPort for FakeTtsClient {
    async fn generate(&self, request: GenerateRequest) -> Result<AudioPayload, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: generating fixed audio"
        );

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        if self.config.fail {
            return Err(GenerationError::ServiceError("fake failure".to_string()));
        }

        Ok(Self::payload_for(&request))
    }
}
