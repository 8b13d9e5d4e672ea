use async_trait::async_trait;

use super::errors::AgentResult;
use crate::domain::conversation::ChatMessage;

/// Capability to produce one model response
///
/// Implementations own transport details; the agent system only sees text
/// or an `AgentError::ModelCall`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a response for `input` under `role_prompt`, with
    /// `history` as prior conversation turns
    async fn generate(
        &self,
        role_prompt: &str,
        input: &str,
        history: &[ChatMessage],
    ) -> AgentResult<String>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}
