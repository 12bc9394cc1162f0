//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod history_handlers;
mod speak_handlers;
mod voice_handlers;

pub use history_handlers::*;
pub use speak_handlers::*;
pub use voice_handlers::*;
