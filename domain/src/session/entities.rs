//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An append-only conversation history (Entity)
///
/// Messages are only ever appended; nothing is mutated or removed once in
/// the history. The single sanctioned exception is
/// [`replace_last_user_message`](Self::replace_last_user_message), used by
/// the orchestrator's one-shot blank-reply retry.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.messages.push(Message::system(system_prompt));
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Replace the most recent user message in place.
    ///
    /// Returns false (and leaves the history untouched) if the last message
    /// is not user-role.
    pub fn replace_last_user_message(&mut self, content: impl Into<String>) -> bool {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::User => {
                last.content = content.into();
                true
            }
            _ => false,
        }
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_appends_in_order() {
        let mut conversation = Conversation::with_system_prompt("be helpful");
        conversation.push_user("hello");
        conversation.push_assistant("hi");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn test_replace_last_user_message() {
        let mut conversation = Conversation::new();
        conversation.push_user("original");
        assert!(conversation.replace_last_user_message("simplified"));
        assert_eq!(conversation.last().unwrap().content, "simplified");
    }

    #[test]
    fn test_replace_refuses_non_user_tail() {
        let mut conversation = Conversation::new();
        conversation.push_user("question");
        conversation.push_assistant("answer");
        assert!(!conversation.replace_last_user_message("nope"));
        assert_eq!(conversation.last().unwrap().content, "answer");
    }
}
