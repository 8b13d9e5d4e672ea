use thiserror::Error;

/// Errors that can occur in the agent system
#[derive(Debug, Error)]
pub enum AgentError {
    /// Any failure contacting or reading from the model endpoint.
    /// Displays as the bare message so the chain can embed it in a trace.
    #[error("{0}")]
    ModelCall(String),

    #[error("Failed to build agent chain: {0}")]
    ChainConstruction(String),

    #[error("Missing credential: {0}")]
    CredentialMissing(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL never belongs in a message that reaches users or logs
        let err = err.without_url();
        if err.is_timeout() {
            AgentError::ModelCall(format!("Model request timed out: {}", err))
        } else {
            AgentError::ModelCall(format!("Model request failed: {}", err))
        }
    }
}
