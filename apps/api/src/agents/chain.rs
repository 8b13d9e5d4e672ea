use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::agent::Agent;
use super::errors::{AgentError, AgentResult};
use super::model::ModelClient;
use super::prompts::library;
use super::types::{AgentOutcome, ChainOutput, TraceEntry};
use crate::domain::conversation::ChatMessage;

/// Sequential chain of agents
///
/// Runs every agent once per user turn, in construction order. Each
/// agent's result is threaded into the next agent's input; a failed agent
/// is recorded in the trace and the chain carries on.
#[derive(Debug)]
pub struct SequentialChain {
    agents: Vec<Arc<Agent>>,
}

impl SequentialChain {
    /// Assemble a chain from agents in execution order
    ///
    /// # Errors
    /// * `ChainConstruction` - if `agents` is empty or two agents share a name
    pub fn new(agents: Vec<Arc<Agent>>) -> AgentResult<Self> {
        if agents.is_empty() {
            return Err(AgentError::ChainConstruction(
                "a chain needs at least one agent".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            if !seen.insert(agent.name()) {
                return Err(AgentError::ChainConstruction(format!(
                    "duplicate agent name: {}",
                    agent.name()
                )));
            }
        }

        Ok(Self { agents })
    }

    /// The standard four-agent chain: analyze, propose, refine, synthesize
    pub fn with_default_agents(client: Arc<dyn ModelClient>) -> AgentResult<Self> {
        let agents = library::default_role_prompts()
            .into_iter()
            .enumerate()
            .map(|(i, prompt)| Arc::new(Agent::new(format!("Agent {}", i + 1), prompt, client.clone())))
            .collect();

        Self::new(agents)
    }

    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    /// Agent at 1-based `index`
    pub fn agent(&self, index: usize) -> AgentResult<&Arc<Agent>> {
        index
            .checked_sub(1)
            .and_then(|i| self.agents.get(i))
            .ok_or_else(|| {
                AgentError::AgentNotFound(format!(
                    "no agent at position {} (chain has {})",
                    index,
                    self.agents.len()
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Reset every agent to its default prompt
    pub fn restore_defaults(&self) {
        for agent in &self.agents {
            agent.restore_default();
        }
        tracing::info!(agents = self.agents.len(), "Restored default prompts");
    }

    /// Run the chain for one user turn
    ///
    /// Never fails: per-agent errors become `Failure` trace entries. The
    /// final output is the last entry's display text, even when that entry
    /// is an error.
    pub async fn execute(&self, input_text: &str, chat_history: &[ChatMessage]) -> ChainOutput {
        tracing::info!(
            agents = self.agents.len(),
            history = chat_history.len(),
            "Starting chain"
        );

        let mut trace: Vec<TraceEntry> = Vec::with_capacity(self.agents.len());

        for (i, agent) in self.agents.iter().enumerate() {
            let index = i + 1;
            let current_input = next_input(input_text, trace.last().map(|e| &e.outcome));

            let outcome = match agent.run(&current_input, chat_history).await {
                Ok(text) => {
                    tracing::info!(index, agent = agent.name(), chars = text.len(), "Agent finished");
                    AgentOutcome::Success(text)
                }
                Err(err) => {
                    tracing::warn!(index, agent = agent.name(), error = %err, "Agent failed, continuing chain");
                    AgentOutcome::Failure(err.to_string())
                }
            };

            trace.push(TraceEntry {
                index,
                agent_name: agent.name().to_string(),
                outcome,
            });
        }

        // `new` rejects empty chains, so the trace has a last entry
        let final_output = trace
            .last()
            .map(|entry| entry.outcome.display_text())
            .unwrap_or_default();

        let failures = trace.iter().filter(|e| !e.outcome.is_success()).count();
        tracing::info!(failures, "Chain finished");

        ChainOutput {
            final_output,
            trace,
        }
    }
}

/// Input for the next agent given the previous agent's outcome
fn next_input(input_text: &str, previous: Option<&AgentOutcome>) -> String {
    match previous {
        None => input_text.to_string(),
        Some(AgentOutcome::Success(result)) => {
            let vars = HashMap::from([("question", input_text), ("previous", result.as_str())]);
            library::handoff_success().render(&vars)
        }
        Some(AgentOutcome::Failure(_)) => {
            let vars = HashMap::from([("question", input_text)]);
            library::handoff_failure().render(&vars)
        }
    }
}
