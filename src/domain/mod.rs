//! Domain Layer - 领域层
//!
//! - Speech Context: 音色、快捷短语、音频负载
//! - 文本归一化（缓存 key）

pub mod speech;

mod text_normalizer;

pub use text_normalizer::normalize_text;
