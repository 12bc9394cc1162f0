//! HTTP Handlers

mod audio;
mod diagnostics;
mod history;
mod ping;
mod speech;
mod voice;
mod websocket;

pub use audio::*;
pub use diagnostics::*;
pub use history::*;
pub use ping::*;
pub use speech::*;
pub use voice::*;
pub use websocket::*;
