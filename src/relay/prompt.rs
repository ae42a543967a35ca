//! System prompt assembly and outbound turn list construction

use crate::api::{ChatPayload, ChatTurn};
use crate::config::AssistantConfig;

/// Assemble the system turn: persona instructions, the mock order dataset,
/// and the closing response directive.
pub fn system_prompt(assistant: &AssistantConfig) -> String {
    let orders =
        serde_json::to_string_pretty(&assistant.orders).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{}\nHere is your mock order database:\n\n{}\n\nRespond naturally to the customer message below.",
        assistant.persona.trim_end(),
        orders
    )
}

/// Build the outbound turn list: the synthesized system turn, then either the
/// supplied history or a single user turn built from `message`. When both are
/// supplied, the history wins.
///
/// History entries missing a string role or content (or carrying empty ones)
/// are dropped; surviving entries keep their content and original order.
pub fn build_turn_list(payload: &ChatPayload, assistant: &AssistantConfig) -> Vec<ChatTurn> {
    let mut turns = vec![ChatTurn::system(system_prompt(assistant))];

    if let Some(history) = payload.history() {
        for entry in history {
            let role = entry.get("role").and_then(|r| r.as_str()).unwrap_or("");
            let content = entry.get("content").and_then(|c| c.as_str()).unwrap_or("");
            if role.is_empty() || content.is_empty() {
                continue;
            }
            turns.push(ChatTurn {
                role: role.to_string(),
                content: content.to_string(),
            });
        }
    } else if let Some(message) = payload.message_text() {
        turns.push(ChatTurn::user(message.to_string()));
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assistant() -> AssistantConfig {
        AssistantConfig::default()
    }

    fn payload(value: serde_json::Value) -> ChatPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_system_prompt_embeds_orders() {
        let prompt = system_prompt(&assistant());
        assert!(prompt.contains("ARTZ-4593"));
        assert!(prompt.contains("ARTZ-3621"));
        assert!(prompt.contains("order status"));
        assert!(prompt.ends_with("Respond naturally to the customer message below."));
    }

    #[test]
    fn test_single_message_builds_two_turns() {
        let turns = build_turn_list(
            &payload(json!({"message": "Where is order ARTZ-4593?"})),
            &assistant(),
        );
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "system");
        assert_eq!(turns[1].role, "user");
        assert_eq!(turns[1].content, "Where is order ARTZ-4593?");
    }

    #[test]
    fn test_history_prepended_with_system_turn() {
        let turns = build_turn_list(
            &payload(json!({"messages": [{"role": "user", "content": "hi"}]})),
            &assistant(),
        );
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "system");
        assert_eq!(turns[1], ChatTurn::user("hi".to_string()));
    }

    #[test]
    fn test_history_entries_missing_content_dropped() {
        let turns = build_turn_list(
            &payload(json!({"messages": [
                {"role": "user", "content": "first"},
                {"role": "assistant"},
                {"role": "user", "content": "second"}
            ]})),
            &assistant(),
        );
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].content, "first");
        assert_eq!(turns[2].content, "second");
    }

    #[test]
    fn test_history_entries_missing_role_dropped() {
        let turns = build_turn_list(
            &payload(json!({"messages": [
                {"content": "orphan"},
                {"role": "", "content": "empty role"},
                {"role": "assistant", "content": "kept"}
            ]})),
            &assistant(),
        );
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(turns[1].content, "kept");
    }

    #[test]
    fn test_history_preserves_order_and_content() {
        let turns = build_turn_list(
            &payload(json!({"messages": [
                {"role": "user", "content": "a"},
                {"role": "assistant", "content": "b"},
                {"role": "user", "content": "c"}
            ]})),
            &assistant(),
        );
        let tail: Vec<(&str, &str)> = turns[1..]
            .iter()
            .map(|t| (t.role.as_str(), t.content.as_str()))
            .collect();
        assert_eq!(tail, vec![("user", "a"), ("assistant", "b"), ("user", "c")]);
    }

    #[test]
    fn test_history_wins_over_message() {
        let turns = build_turn_list(
            &payload(json!({
                "message": "ignored",
                "messages": [{"role": "user", "content": "from history"}]
            })),
            &assistant(),
        );
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, "from history");
    }

    #[test]
    fn test_empty_history_yields_system_turn_only() {
        let turns = build_turn_list(&payload(json!({"messages": []})), &assistant());
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, "system");
    }

    #[test]
    fn test_non_array_history_falls_back_to_message() {
        let turns = build_turn_list(
            &payload(json!({"message": "hello", "messages": "bogus"})),
            &assistant(),
        );
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, "hello");
    }
}
