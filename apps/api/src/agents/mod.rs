// Agent system modules
//
// Role-bound agents, the sequential chain that runs them, and the
// model client they call.

pub mod agent;
pub mod chain;
pub mod errors;
pub mod gemini;
pub mod model;
pub mod prompts;
pub mod retry;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use agent::Agent;
pub use chain::SequentialChain;
pub use errors::{AgentError, AgentResult};
pub use gemini::GeminiClient;
pub use model::ModelClient;
pub use types::{AgentConfig, AgentOutcome, ChainOutput, TraceEntry};
