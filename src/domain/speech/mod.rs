//! Speech Context - 语音限界上下文
//!
//! 职责:
//! - 预置音色与快捷短语
//! - 音频负载（base64 文本）

mod catalog;
mod errors;
mod value_objects;

pub use catalog::{AVAILABLE_VOICES, QUICK_PHRASES};
pub use errors::SpeechError;
pub use value_objects::{AudioPayload, VoiceGender, VoiceName, VoiceOption};
