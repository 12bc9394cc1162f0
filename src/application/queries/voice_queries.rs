//! Voice Queries - 音色与常用语查询

/// 列出所有音色
#[derive(Debug, Clone, Default)]
pub struct ListVoices;

/// 获取当前选择的音色
#[derive(Debug, Clone, Default)]
pub struct GetSelectedVoice;

/// 列出常用语
#[derive(Debug, Clone, Default)]
pub struct ListPhrases;
