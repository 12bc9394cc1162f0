//! 文本归一化
//!
//! 把用户输入映射为缓存 key：
//! 1. 转小写
//! 2. 去掉所有非单词字符（ASCII 字母、数字、下划线以外）且非空白的字符，
//!    非 ASCII 字母同样被去掉
//! 3. 连续空白合并为单个空格
//! 4. 去掉首尾空白
//!
//! 大小写、标点、空白数量不同的同一句话得到同一个 key

/// 是否为单词字符（`[A-Za-z0-9_]`）
#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// 归一化文本，得到缓存 key
///
/// 纯函数，幂等：`normalize_text(&normalize_text(s)) == normalize_text(s)`
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            // 开头的空白直接丢弃
            pending_space = !normalized.is_empty();
        } else if is_word_char(ch) {
            if pending_space {
                normalized.push(' ');
                pending_space = false;
            }
            normalized.push(ch);
        }
    }

    normalized
}
