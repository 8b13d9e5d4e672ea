use std::sync::Arc;

use crate::agents::SequentialChain;
use crate::domain::repositories::ConversationRepository;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<SequentialChain>,
    pub conversations: Arc<dyn ConversationRepository>,
}

impl AppState {
    pub fn new(chain: Arc<SequentialChain>, conversations: Arc<dyn ConversationRepository>) -> Self {
        Self {
            chain,
            conversations,
        }
    }
}
