//! Speech Context - Value Objects

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::SpeechError;

/// 预置音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VoiceName {
    #[default]
    Orus,
    Umbriel,
    Algenib,
    Sadaltager,
    Charon,
    Fenrir,
    Puck,
}

impl VoiceName {
    /// 所有可用音色（按展示顺序）
    pub const ALL: [VoiceName; 7] = [
        Self::Orus,
        Self::Umbriel,
        Self::Algenib,
        Self::Sadaltager,
        Self::Charon,
        Self::Fenrir,
        Self::Puck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orus => "Orus",
            Self::Umbriel => "Umbriel",
            Self::Algenib => "Algenib",
            Self::Sadaltager => "Sadaltager",
            Self::Charon => "Charon",
            Self::Fenrir => "Fenrir",
            Self::Puck => "Puck",
        }
    }
}

impl FromStr for VoiceName {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| SpeechError::UnknownVoice(s.to_string()))
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音色性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoiceGender {
    Male,
}

/// 音色选项（供客户端展示）
#[derive(Debug, Clone, Serialize)]
pub struct VoiceOption {
    pub id: VoiceName,
    pub name: &'static str,
    pub description: &'static str,
    pub gender: VoiceGender,
}

/// 音频负载 - base64 编码的音频数据
///
/// 不变量: 存储与读取前后逐字节一致，不做任何转换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioPayload(String);

impl AudioPayload {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// 从原始字节编码
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// 解码为原始音频字节
    pub fn decode(&self) -> Result<Vec<u8>, SpeechError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.0.as_bytes())
            .map_err(|e| SpeechError::InvalidPayload(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AudioPayload {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}
