//! Display model for the goal-building chat transcript.

use uuid::Uuid;

use super::api::ChatEntry;

/// Greeting shown when a conversation has no history yet (or the previous
/// session was finalized and no new one has started).
pub const WELCOME_MESSAGE: &str = "Tell me what you'd like to work on!";

const WELCOME_ID: &str = "agent-welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Agent,
}

/// One rendered transcript line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    /// The seeded agent greeting.
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            sender: ChatSender::Agent,
            text: WELCOME_MESSAGE.to_string(),
        }
    }

    /// Locally created user message (optimistic append before the send
    /// completes).
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: format!("user-{}", Uuid::new_v4()),
            sender: ChatSender::User,
            text: text.into(),
        }
    }

    /// Agent reply received from the backend.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            id: format!("agent-{}", Uuid::new_v4()),
            sender: ChatSender::Agent,
            text: text.into(),
        }
    }
}

/// Map history entries to display messages.
///
/// An empty history seeds exactly one welcome message so the screen never
/// opens blank. Entry ids reuse the server timestamp when present; the
/// index fallback keeps ids stable within one load.
pub fn map_history(entries: &[ChatEntry]) -> Vec<ChatMessage> {
    if entries.is_empty() {
        return vec![ChatMessage::welcome()];
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ChatMessage {
            id: entry
                .timestamp
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| format!("chat-entry-{}", index)),
            sender: if entry.sender.eq_ignore_ascii_case("user") {
                ChatSender::User
            } else {
                ChatSender::Agent
            },
            text: entry.message.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sender: &str, message: &str, timestamp: Option<&str>) -> ChatEntry {
        ChatEntry {
            sender: sender.to_string(),
            message: message.to_string(),
            timestamp: timestamp.map(|t| t.to_string()),
        }
    }

    #[test]
    fn test_empty_history_seeds_welcome() {
        let messages = map_history(&[]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, ChatSender::Agent);
        assert_eq!(messages[0].text, WELCOME_MESSAGE);
        assert_eq!(messages[0].id, "agent-welcome");
    }

    #[test]
    fn test_sender_case_insensitive() {
        let messages = map_history(&[
            entry("USER", "hi", Some("2025-09-01T10:00:00Z")),
            entry("agent", "hello", Some("2025-09-01T10:00:05Z")),
            entry("system", "note", Some("2025-09-01T10:00:06Z")),
        ]);
        assert_eq!(messages[0].sender, ChatSender::User);
        assert_eq!(messages[1].sender, ChatSender::Agent);
        // Anything that is not a user line renders as the agent.
        assert_eq!(messages[2].sender, ChatSender::Agent);
    }

    #[test]
    fn test_entry_ids_prefer_timestamp() {
        let messages = map_history(&[
            entry("user", "first", Some("ts-1")),
            entry("agent", "second", None),
        ]);
        assert_eq!(messages[0].id, "ts-1");
        assert_eq!(messages[1].id, "chat-entry-1");
    }

    #[test]
    fn test_local_message_ids_are_unique() {
        let a = ChatMessage::user("one");
        let b = ChatMessage::user("one");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("user-"));
        assert!(ChatMessage::agent("x").id.starts_with("agent-"));
    }
}
