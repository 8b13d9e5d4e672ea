use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::errors::AgentResult;
use super::model::ModelClient;
use super::types::AgentConfig;
use crate::domain::conversation::ChatMessage;

/// A role-bound wrapper around one language-model call
///
/// The active configuration sits behind a copy-on-write pointer: `run`
/// takes a snapshot when it starts, and `update_prompt` swaps in a whole
/// new `AgentConfig`. A run in flight keeps the prompt it started with.
pub struct Agent {
    name: String,
    default_prompt: String,
    config: RwLock<Arc<AgentConfig>>,
    client: Arc<dyn ModelClient>,
}

impl Agent {
    /// Create an agent whose current prompt is its default prompt
    pub fn new(
        name: impl Into<String>,
        default_prompt: impl Into<String>,
        client: Arc<dyn ModelClient>,
    ) -> Self {
        let name = name.into();
        let default_prompt = default_prompt.into();
        let config = AgentConfig::new(name.clone(), default_prompt.clone());

        Self {
            name,
            default_prompt,
            config: RwLock::new(Arc::new(config)),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> Arc<AgentConfig> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current role prompt
    pub fn get_prompt(&self) -> String {
        self.config().role_prompt.clone()
    }

    /// Prompt the agent was created with
    pub fn default_prompt(&self) -> &str {
        &self.default_prompt
    }

    pub fn is_default(&self) -> bool {
        self.config().role_prompt == self.default_prompt
    }

    /// Replace the active role prompt
    pub fn update_prompt(&self, new_prompt: impl Into<String>) {
        let mut slot = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let next = slot.with_prompt(new_prompt);
        *slot = Arc::new(next);

        tracing::info!(agent = %self.name, "Role prompt updated");
    }

    /// Put the default prompt back
    pub fn restore_default(&self) {
        self.update_prompt(self.default_prompt.clone());
    }

    /// Run the agent on `input` with the current configuration
    pub async fn run(&self, input: &str, chat_history: &[ChatMessage]) -> AgentResult<String> {
        let config = self.config();
        run_with(&config, self.client.as_ref(), input, chat_history).await
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.client.model_name())
            .field("is_default", &self.is_default())
            .finish()
    }
}

/// Run one agent configuration against a model client
///
/// Errors from the client are returned as-is.
pub async fn run_with(
    config: &AgentConfig,
    client: &dyn ModelClient,
    input: &str,
    chat_history: &[ChatMessage],
) -> AgentResult<String> {
    tracing::debug!(
        agent = %config.name,
        model = client.model_name(),
        input_chars = input.len(),
        history = chat_history.len(),
        "Running agent"
    );

    client
        .generate(&config.role_prompt, input, chat_history)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::errors::AgentError;
    use crate::agents::testing::ScriptedClient;

    fn agent_with(client: Arc<ScriptedClient>) -> Agent {
        Agent::new("Agent 1", "default prompt", client)
    }

    #[test]
    fn test_agent_starts_with_default_prompt() {
        let agent = agent_with(Arc::new(ScriptedClient::numbered()));

        assert_eq!(agent.name(), "Agent 1");
        assert_eq!(agent.get_prompt(), "default prompt");
        assert_eq!(agent.default_prompt(), "default prompt");
        assert!(agent.is_default());
    }

    #[tokio::test]
    async fn test_run_passes_prompt_input_and_history() {
        let client = Arc::new(ScriptedClient::numbered());
        let agent = agent_with(client.clone());
        let history = vec![ChatMessage::user("earlier"), ChatMessage::assistant("reply")];

        let result = agent.run("How do I sort a list?", &history).await;

        assert_eq!(result.unwrap(), "response 1");
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].role_prompt, "default prompt");
        assert_eq!(calls[0].input, "How do I sort a list?");
        assert_eq!(calls[0].history, history);
    }

    #[tokio::test]
    async fn test_update_prompt_affects_next_run() {
        let client = Arc::new(ScriptedClient::numbered());
        let agent = agent_with(client.clone());

        agent.update_prompt("be terse");
        agent.run("q", &[]).await.unwrap();

        assert_eq!(agent.get_prompt(), "be terse");
        assert!(!agent.is_default());
        assert_eq!(client.calls()[0].role_prompt, "be terse");
    }

    #[tokio::test]
    async fn test_update_prompt_twice_is_idempotent() {
        let client = Arc::new(ScriptedClient::numbered());
        let agent = agent_with(client.clone());

        agent.update_prompt("same");
        let once = agent.config();
        agent.update_prompt("same");

        assert_eq!(*agent.config(), *once);
        agent.run("q", &[]).await.unwrap();
        assert_eq!(client.calls()[0].role_prompt, "same");
    }

    #[test]
    fn test_snapshot_survives_update() {
        let agent = agent_with(Arc::new(ScriptedClient::numbered()));

        let snapshot = agent.config();
        agent.update_prompt("replacement");

        assert_eq!(snapshot.role_prompt, "default prompt");
        assert_eq!(agent.get_prompt(), "replacement");
    }

    #[test]
    fn test_restore_default() {
        let agent = agent_with(Arc::new(ScriptedClient::numbered()));

        agent.update_prompt("custom");
        agent.restore_default();

        assert_eq!(agent.get_prompt(), "default prompt");
        assert!(agent.is_default());
    }

    #[tokio::test]
    async fn test_run_propagates_model_error() {
        let client = Arc::new(ScriptedClient::failing_on(&[1], "quota exceeded"));
        let agent = agent_with(client);

        let result = agent.run("q", &[]).await;

        match result {
            Err(AgentError::ModelCall(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("Expected ModelCall error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_with_uses_given_config() {
        let client = ScriptedClient::numbered();
        let config = AgentConfig::new("Solo", "explicit prompt");

        run_with(&config, &client, "input", &[]).await.unwrap();

        assert_eq!(client.calls()[0].role_prompt, "explicit prompt");
    }
}
