//! WebSocket Playback Sink
//!
//! 把播放请求作为事件推送给已连接的客户端，由客户端实际发声。
//! 同一时间只有一个当前播放；stop 会通知客户端停止当前播放。

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::wav::{duration_ms, PcmFormat};
use crate::application::ports::{PlaybackError, PlaybackRequest, PlaybackSinkPort};
use crate::infrastructure::events::{EventPublisher, WsEvent};

/// WebSocket 播放输出
pub struct WsPlaybackSink {
    publisher: Arc<EventPublisher>,
    sample_rate: u32,
    current: Mutex<Option<String>>,
}

impl WsPlaybackSink {
    pub fn new(publisher: Arc<EventPublisher>, sample_rate: u32) -> Self {
        Self {
            publisher,
            sample_rate,
            current: Mutex::new(None),
        }
    }

    /// 当前播放 ID
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl PlaybackSinkPort for WsPlaybackSink {
    async fn play(&self, request: PlaybackRequest) -> Result<String, PlaybackError> {
        // 先确认负载可解码
        let pcm = request
            .payload
            .decode()
            .map_err(|e| PlaybackError::Decode(e.to_string()))?;

        let playback_id = Uuid::new_v4().to_string();
        let replaced = self
            .current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(playback_id.clone());

        // 新播放顶替旧播放时，旧播放同样要通知停止
        if let Some(previous) = replaced {
            tracing::debug!(playback_id = %previous, "Playback replaced");
            self.publisher
                .publish(WsEvent::PlaybackStopped { playback_id: previous });
        }

        tracing::debug!(
            playback_id = %playback_id,
            voice = %request.voice,
            byte_len = pcm.len(),
            "Playback started"
        );

        self.publisher.publish(WsEvent::PlaybackStarted {
            playback_id: playback_id.clone(),
            text: request.text,
            voice: request.voice.to_string(),
            audio: request.payload.into_inner(),
            sample_rate: self.sample_rate,
            byte_len: pcm.len(),
            duration_ms: duration_ms(pcm.len(), PcmFormat::mono_16bit(self.sample_rate)),
        });

        Ok(playback_id)
    }

    async fn stop(&self) {
        let stopped = self.current.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(playback_id) = stopped {
            tracing::debug!(playback_id = %playback_id, "Playback stopped");
            self.publisher.publish(WsEvent::PlaybackStopped { playback_id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::{AudioPayload, VoiceName};

    fn request(payload: AudioPayload) -> PlaybackRequest {
        PlaybackRequest {
            text: "Thank you.".to_string(),
            voice: VoiceName::Orus,
            payload,
        }
    }

    #[tokio::test]
    async fn test_play_then_stop_publishes_events() {
        let publisher = EventPublisher::new().arc();
        let mut rx = publisher.subscribe();
        let sink = WsPlaybackSink::new(publisher.clone(), 24000);

        let id = sink
            .play(request(AudioPayload::from_bytes(&[1, 2, 3, 4])))
            .await
            .unwrap();
        assert_eq!(sink.current().as_deref(), Some(id.as_str()));

        match rx.recv().await.unwrap() {
            WsEvent::PlaybackStarted {
                playback_id,
                audio,
                byte_len,
                sample_rate,
                ..
            } => {
                assert_eq!(playback_id, id);
                assert_eq!(audio, "AQIDBA==");
                assert_eq!(byte_len, 4);
                assert_eq!(sample_rate, 24000);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        sink.stop().await;
        assert!(sink.current().is_none());
        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::PlaybackStopped { playback_id } if playback_id == id
        ));
    }

    #[tokio::test]
    async fn test_replacing_playback_stops_previous() {
        let publisher = EventPublisher::new().arc();
        let mut rx = publisher.subscribe();
        let sink = WsPlaybackSink::new(publisher.clone(), 24000);

        let first = sink
            .play(request(AudioPayload::from_bytes(&[1, 2])))
            .await
            .unwrap();
        let second = sink
            .play(request(AudioPayload::from_bytes(&[3, 4])))
            .await
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(sink.current().as_deref(), Some(second.as_str()));

        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::PlaybackStarted { playback_id, .. } if playback_id == first
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::PlaybackStopped { playback_id } if playback_id == first
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::PlaybackStarted { playback_id, .. } if playback_id == second
        ));
    }

    #[tokio::test]
    async fn test_stop_without_playback_is_noop() {
        let publisher = EventPublisher::new().arc();
        let mut rx = publisher.subscribe();
        let sink = WsPlaybackSink::new(publisher, 24000);

        sink.stop().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_undecodable_payload_rejected() {
        let sink = WsPlaybackSink::new(EventPublisher::new().arc(), 24000);
        let result = sink.play(request(AudioPayload::new("%%%"))).await;
        assert!(matches!(result, Err(PlaybackError::Decode(_))));
        assert!(sink.current().is_none());
    }
}
