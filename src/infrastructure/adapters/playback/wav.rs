//! PCM → WAV 封装
//!
//! 生成的音频是裸 16-bit little-endian PCM（单声道），
//! 通过 HTTP 直接下载时补上 RIFF/WAVE 头。

/// PCM 格式
#[derive(Debug, Clone, Copy)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// 16-bit 单声道
    pub fn mono_16bit(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// WAV 头长度
pub const WAV_HEADER_LEN: usize = 44;

/// 给 PCM 数据加上 44 字节的 WAV 头
pub fn wrap_pcm_as_wav(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF chunk
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}

/// 计算时长（毫秒）
pub fn duration_ms(pcm_len: usize, format: PcmFormat) -> u64 {
    let byte_rate = u64::from(format.byte_rate());
    if byte_rate == 0 {
        return 0;
    }
    pcm_len as u64 * 1000 / byte_rate
}
