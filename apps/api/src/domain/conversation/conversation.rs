use super::value_objects::{ChatMessage, ChatRole};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Conversation aggregate root
///
/// Holds the append-only history of one chat session.
///
/// # Invariants
/// - Messages are only ever appended, never edited or removed
/// - Message content cannot be empty
/// - `updated_at` is never earlier than `created_at`
///
/// # Example
/// ```
/// use cotchat_api::domain::conversation::{ChatRole, Conversation};
///
/// let mut conversation = Conversation::new();
/// conversation.append(ChatRole::User, "How do I sort a list?").expect("valid message");
///
/// assert_eq!(conversation.messages().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    messages: Vec<ChatMessage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Starts an empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a message to the history
    ///
    /// # Returns
    /// * `Ok(())` - Message recorded
    /// * `Err(String)` - If the content is empty or whitespace only
    pub fn append(&mut self, role: ChatRole, content: impl Into<String>) -> Result<(), String> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err("Message content cannot be empty".to_string());
        }

        self.messages.push(ChatMessage::new(role, content));
        self.updated_at = Utc::now();
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the history in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
