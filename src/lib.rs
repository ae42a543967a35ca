//! voice-relay: credential-injecting HTTP relay for a browser voice assistant
//!
//! Fronts two upstream providers:
//! - a speech synthesis API (voice catalog listing + raw WAV generation)
//! - a chat completion API (conversational replies for the assistant)
//!
//! The relay exposes `/voices`, `/generate` and `/chat`, attaches provider
//! credentials from its configuration, and hands the provider payload (JSON or
//! binary audio) back to the browser. It also serves the static frontend.

pub mod api;
pub mod config;
pub mod relay;

pub use config::AppConfig;
pub use relay::{build_router, run_server, RelayState};
