//! Speak Command Handlers
//!
//! 朗读流程：归一化 → 查缓存 → 命中则播放并刷新 last_used；
//! 未命中则调用 TTS，写入缓存后播放。
//!
//! 新请求到来时先领取序号，再停止当前播放。生成与缓存写入在独立任务中执行，
//! 即使请求被打断也会完成，只是结果不再播放。
//! 「检查序号 + 播放」与 stop 在同一把锁内串行，旧请求不会在新请求停止之后开始播放。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::commands::speak_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioCachePort, GenerateRequest, PlaybackError, PlaybackRequest, PlaybackSinkPort,
    SpeechGeneratorPort, StoreState, VoicePreferencePort,
};
use crate::domain::normalize_text;
use crate::domain::speech::{AudioPayload, SpeechError, VoiceName};
use crate::infrastructure::memory::DebugLog;

/// Speak Handler - 朗读文本
pub struct SpeakHandler {
    audio_cache: Arc<dyn AudioCachePort>,
    speech_generator: Arc<dyn SpeechGeneratorPort>,
    playback_sink: Arc<dyn PlaybackSinkPort>,
    voice_preference: Arc<dyn VoicePreferencePort>,
    debug_log: Arc<DebugLog>,
    /// 最新一次朗读请求的序号
    latest_utterance: AtomicU64,
    /// 串行化 stop 与播放
    playback_gate: Mutex<()>,
}

impl SpeakHandler {
    pub fn new(
        audio_cache: Arc<dyn AudioCachePort>,
        speech_generator: Arc<dyn SpeechGeneratorPort>,
        playback_sink: Arc<dyn PlaybackSinkPort>,
        voice_preference: Arc<dyn VoicePreferencePort>,
        debug_log: Arc<DebugLog>,
    ) -> Self {
        Self {
            audio_cache,
            speech_generator,
            playback_sink,
            voice_preference,
            debug_log,
            latest_utterance: AtomicU64::new(0),
            playback_gate: Mutex::new(()),
        }
    }

    pub async fn handle(&self, cmd: SpeakCommand) -> Result<SpeakResponse, ApplicationError> {
        if cmd.text.trim().is_empty() {
            return Err(SpeechError::EmptyText.into());
        }

        // 先领取序号，使进行中的旧请求立即失效，再打断当前播放
        let utterance = self.latest_utterance.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let _gate = self.playback_gate.lock().await;
            self.playback_sink.stop().await;
        }

        let voice = match cmd.voice {
            Some(voice) => voice,
            None => self.voice_preference.load().await.unwrap_or_default(),
        };
        let normalized = normalize_text(&cmd.text);
        self.debug_log
            .log(format!("Speaking text, normalized: {}", normalized));

        if let Some(cached) = self.audio_cache.get(&normalized).await {
            self.debug_log.log("✓ Cache HIT - Using cached audio");

            if cached.voice_id != voice.as_str() {
                tracing::debug!(
                    key = %normalized,
                    cached_voice = %cached.voice_id,
                    requested_voice = %voice,
                    "Cache hit generated with a different voice"
                );
            }

            let payload = AudioPayload::new(cached.audio_payload);
            let cached_voice = cached.voice_id.parse::<VoiceName>().unwrap_or(voice);

            match self
                .play_if_latest(utterance, &cmd.text, cached_voice, &payload)
                .await
            {
                Ok(playback_id) => {
                    // 刷新 last_used 与原始文本，保留原音色
                    if let Err(e) = self
                        .audio_cache
                        .put(&normalized, &cmd.text, payload.as_str(), &cached.voice_id)
                        .await
                    {
                        self.debug_log
                            .warn(format!("Failed to refresh cached audio: {}", e));
                    }

                    return Ok(SpeakResponse {
                        normalized_text: normalized,
                        text: cmd.text,
                        voice: cached.voice_id,
                        source: AudioSource::Cache,
                        played: playback_id.is_some(),
                        playback_id,
                        audio: payload,
                    });
                }
                Err(e) => {
                    self.debug_log.error(format!(
                        "Cached audio unusable, will generate new audio: {}",
                        e
                    ));
                }
            }
        } else if self.audio_cache.state() == StoreState::Failed {
            self.debug_log
                .warn("Audio cache not available, skipping cache check");
        } else {
            self.debug_log.log("✗ Cache MISS - Generating new audio");
        }

        let job = tokio::spawn(generate_and_cache(
            self.speech_generator.clone(),
            self.audio_cache.clone(),
            self.debug_log.clone(),
            normalized.clone(),
            cmd.text.clone(),
            voice,
        ));
        let payload = job
            .await
            .map_err(|e| ApplicationError::internal(format!("Generation task failed: {}", e)))??;

        let playback_id = self
            .play_if_latest(utterance, &cmd.text, voice, &payload)
            .await
            .map_err(|e| {
                ApplicationError::ExternalServiceError(format!(
                    "Generated audio could not be played: {}",
                    e
                ))
            })?;

        Ok(SpeakResponse {
            normalized_text: normalized,
            text: cmd.text,
            voice: voice.to_string(),
            source: AudioSource::Generated,
            played: playback_id.is_some(),
            playback_id,
            audio: payload,
        })
    }

    /// 只有仍是最新请求时才播放
    async fn play_if_latest(
        &self,
        utterance: u64,
        text: &str,
        voice: VoiceName,
        payload: &AudioPayload,
    ) -> Result<Option<String>, PlaybackError> {
        let _gate = self.playback_gate.lock().await;
        if self.latest_utterance.load(Ordering::SeqCst) != utterance {
            self.debug_log
                .log("Superseded by a newer request, skipping playback");
            return Ok(None);
        }

        let playback_id = self
            .playback_sink
            .play(PlaybackRequest {
                text: text.to_string(),
                voice,
                payload: payload.clone(),
            })
            .await?;
        Ok(Some(playback_id))
    }
}

/// 生成语音并写入缓存
///
/// 缓存写入失败只记录日志，不影响返回的音频
async fn generate_and_cache(
    speech_generator: Arc<dyn SpeechGeneratorPort>,
    audio_cache: Arc<dyn AudioCachePort>,
    debug_log: Arc<DebugLog>,
    normalized: String,
    text: String,
    voice: VoiceName,
) -> Result<AudioPayload, ApplicationError> {
    let payload = speech_generator
        .generate(GenerateRequest {
            text: text.clone(),
            voice,
        })
        .await
        .map_err(|e| {
            debug_log.error(format!("Speech generation failed: {}", e));
            ApplicationError::from(e)
        })?;

    debug_log.log("Audio generated, caching...");
    match audio_cache
        .put(&normalized, &text, payload.as_str(), voice.as_str())
        .await
    {
        Ok(()) => debug_log.log("Audio cached successfully"),
        Err(e) => debug_log.warn(format!("Failed to cache audio: {}", e)),
    }

    Ok(payload)
}

/// GenerateSpeech Handler - 直接生成语音，不经过缓存
pub struct GenerateSpeechHandler {
    speech_generator: Arc<dyn SpeechGeneratorPort>,
}

impl GenerateSpeechHandler {
    pub fn new(speech_generator: Arc<dyn SpeechGeneratorPort>) -> Self {
        Self { speech_generator }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSpeechCommand,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        if cmd.text.trim().is_empty() {
            return Err(SpeechError::EmptyText.into());
        }

        let audio = self
            .speech_generator
            .generate(GenerateRequest {
                text: cmd.text,
                voice: cmd.voice,
            })
            .await?;

        Ok(GenerateSpeechResponse { audio })
    }
}
