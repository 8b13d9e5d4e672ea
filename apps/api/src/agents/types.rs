use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable configuration of one agent
///
/// Replaced wholesale when the operator edits a prompt, never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub role_prompt: String,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, role_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_prompt: role_prompt.into(),
        }
    }

    /// Returns a copy of this configuration with a different role prompt
    pub fn with_prompt(&self, role_prompt: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            role_prompt: role_prompt.into(),
        }
    }
}

/// Result of one agent invocation inside a chain run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum AgentOutcome {
    Success(String),
    Failure(String),
}

impl AgentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AgentOutcome::Success(_))
    }

    /// Text shown for this outcome: the response, or `Error: {message}`
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AgentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentOutcome::Success(text) => write!(f, "{}", text),
            AgentOutcome::Failure(message) => write!(f, "Error: {}", message),
        }
    }
}

/// One record of the per-agent trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based position in the chain
    pub index: usize,
    pub agent_name: String,
    pub outcome: AgentOutcome,
}

impl TraceEntry {
    /// Positional label, `Agent {index}`
    pub fn label(&self) -> String {
        format!("Agent {}", self.index)
    }
}

/// Everything one chain run hands to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOutput {
    pub final_output: String,
    pub trace: Vec<TraceEntry>,
}

impl ChainOutput {
    /// Looks up a trace entry by its positional label (`Agent 3`)
    pub fn entry(&self, label: &str) -> Option<&TraceEntry> {
        self.trace.iter().find(|entry| entry.label() == label)
    }
}
