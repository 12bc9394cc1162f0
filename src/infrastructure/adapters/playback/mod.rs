//! Playback Adapter - 播放输出实现

mod wav;
mod ws_playback_sink;

pub use wav::{duration_ms, wrap_pcm_as_wav, PcmFormat, WAV_HEADER_LEN};
pub use ws_playback_sink::WsPlaybackSink;
