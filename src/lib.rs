//! VocalRest - 带音频缓存的文本朗读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 文本归一化（缓存主键）
//! - Speech Context: 音色、音频负载、常用语
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AudioCache, SpeechGenerator, PlaybackSink, VoicePreference）
//! - Commands: CQRS 命令处理器（朗读、清空历史、选择音色）
//! - Queries: CQRS 查询处理器（历史、缓存音频、音色）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Persistence: Sled 音频缓存与音色偏好
//! - Memory: 内存缓存、调试日志
//! - Adapters: Gemini TTS Client, WebSocket 播放输出
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
