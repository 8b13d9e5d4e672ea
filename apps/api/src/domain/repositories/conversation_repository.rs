use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::conversation::{ChatMessage, Conversation};

/// Repository trait for Conversation aggregate
///
/// Defines the contract for storing and retrieving chat sessions.
/// Implementations decide how long conversations live.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save a conversation (insert or replace)
    async fn save(&self, conversation: &Conversation) -> Result<(), String>;

    /// Find a conversation by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, String>;

    /// Append messages to a stored conversation, in order, as one step
    ///
    /// Returns the updated conversation.
    async fn append_messages(
        &self,
        id: Uuid,
        messages: Vec<ChatMessage>,
    ) -> Result<Conversation, String>;

    /// Delete a conversation by ID
    async fn delete(&self, id: Uuid) -> Result<(), String>;
}
