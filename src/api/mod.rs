//! Wire types for the relay surface and both upstream providers

mod chat;
mod tts;

pub use chat::*;
pub use tts::*;
