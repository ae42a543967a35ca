//! Compact request logging for the relay routes

use crate::api::ChatTurn;

/// Format a chat relay log line: outbound turn count plus a preview of the
/// first user turn
pub fn format_chat_log(turns: &[ChatTurn]) -> String {
    let mut parts = vec![format!("turns={}", turns.len())];

    if let Some(turn) = turns.iter().find(|t| t.role == "user") {
        parts.push(format!(
            "\"{}\"",
            truncate_message(&normalize_whitespace(&turn.content))
        ));
    }

    format!("→ chat {}", parts.join(" "))
}

/// Format a synthesis log line
pub fn format_generate_log(text: &str, voice_id: &str, model_id: &str) -> String {
    format!(
        "→ generate voice={} model={} \"{}\"",
        voice_id,
        model_id,
        truncate_message(&normalize_whitespace(text))
    )
}

/// Convert newlines and tabs to single spaces, collapse multiple spaces
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate message according to rules:
/// - If <= 100 chars: show all
/// - If > 100 chars: first 25 + " ... " + last 75
fn truncate_message(s: &str) -> String {
    const MAX_TOTAL: usize = 100;
    const PREFIX_LEN: usize = 25;
    const SUFFIX_LEN: usize = 75;
    const ELLIPSIS: &str = " ... ";

    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= MAX_TOTAL {
        return s.to_string();
    }

    let prefix: String = chars[..PREFIX_LEN].iter().collect();
    let suffix: String = chars[chars.len() - SUFFIX_LEN..].iter().collect();

    format!("{}{}{}", prefix, ELLIPSIS, suffix)
}
