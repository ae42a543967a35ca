//! The relay server: router construction, route handlers, prompt assembly

mod prompt;
mod request_log;
mod routes;
mod server;

pub use prompt::{build_turn_list, system_prompt};
pub use request_log::{format_chat_log, format_generate_log};
pub use server::{build_router, run_server, RelayState};
