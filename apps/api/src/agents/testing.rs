// Test doubles for the model client

use async_trait::async_trait;
use std::sync::Mutex;

use super::errors::{AgentError, AgentResult};
use super::model::ModelClient;
use crate::domain::conversation::ChatMessage;

/// One recorded `generate` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub role_prompt: String,
    pub input: String,
    pub history: Vec<ChatMessage>,
}

type Responder = Box<dyn Fn(usize, &str, &str) -> AgentResult<String> + Send + Sync>;

/// Model client that answers from a closure and records every call
pub struct ScriptedClient {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// `responder` receives the 0-based call number, the role prompt and the input
    pub fn new(
        responder: impl Fn(usize, &str, &str) -> AgentResult<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `response {n}` for the n-th call (1-based)
    pub fn numbered() -> Self {
        Self::new(|n, _, _| Ok(format!("response {}", n + 1)))
    }

    /// Like `numbered`, but the given 1-based calls fail with `message`
    pub fn failing_on(failing: &'static [usize], message: &'static str) -> Self {
        Self::new(move |n, _, _| {
            if failing.contains(&(n + 1)) {
                Err(AgentError::ModelCall(message.to_string()))
            } else {
                Ok(format!("response {}", n + 1))
            }
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(
        &self,
        role_prompt: &str,
        input: &str,
        history: &[ChatMessage],
    ) -> AgentResult<String> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                role_prompt: role_prompt.to_string(),
                input: input.to_string(),
                history: history.to_vec(),
            });
            calls.len() - 1
        };
        (self.responder)(n, role_prompt, input)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
