use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::conversation::{ChatMessage, Conversation};
use crate::domain::repositories::ConversationRepository;

/// Process-local implementation of ConversationRepository
///
/// Conversations live as long as the process does; nothing is written
/// to disk.
#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<Uuid, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), String> {
        self.conversations
            .write()
            .await
            .insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, String> {
        Ok(self.conversations.read().await.get(&id).cloned())
    }

    async fn append_messages(
        &self,
        id: Uuid,
        messages: Vec<ChatMessage>,
    ) -> Result<Conversation, String> {
        let mut conversations = self.conversations.write().await;
        let stored = conversations
            .get_mut(&id)
            .ok_or_else(|| format!("Conversation not found: {}", id))?;

        // Validate on a copy so a rejected message leaves the stored history untouched
        let mut updated = stored.clone();
        for message in messages {
            updated.append(message.role, message.content)?;
        }
        *stored = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        self.conversations
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| format!("Conversation not found: {}", id))
    }
}
