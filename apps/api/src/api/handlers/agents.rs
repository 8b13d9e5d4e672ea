use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::agents::Agent;
use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// Request body for replacing an agent's role prompt
#[derive(Debug, Deserialize)]
pub struct UpdatePromptRequest {
    pub prompt: String,
}

/// One agent as shown in the customization panel
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentResponse {
    pub index: usize,
    pub name: String,
    pub prompt: String,
    pub is_default: bool,
}

impl AgentResponse {
    fn from_agent(index: usize, agent: &Agent) -> Self {
        let config = agent.config();
        Self {
            index,
            name: agent.name().to_string(),
            is_default: config.role_prompt == agent.default_prompt(),
            prompt: config.role_prompt.clone(),
        }
    }
}

fn all_agents(state: &AppState) -> Vec<AgentResponse> {
    state
        .chain
        .agents()
        .iter()
        .enumerate()
        .map(|(i, agent)| AgentResponse::from_agent(i + 1, agent))
        .collect()
}

/// List the chain's agents in execution order
///
/// GET /api/agents
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentResponse>> {
    Json(all_agents(&state))
}

/// Get one agent by 1-based position
///
/// GET /api/agents/:index
pub async fn get_agent(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<AgentResponse>, ApiError> {
    let agent = state.chain.agent(index)?;
    Ok(Json(AgentResponse::from_agent(index, agent)))
}

/// Replace an agent's role prompt
///
/// PUT /api/agents/:index/prompt
pub async fn update_prompt(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<UpdatePromptRequest>,
) -> Result<Json<AgentResponse>, ApiError> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Prompt cannot be empty"));
    }

    let agent = state.chain.agent(index)?;
    agent.update_prompt(req.prompt);

    Ok(Json(AgentResponse::from_agent(index, agent)))
}

/// Put every agent back on its default prompt
///
/// POST /api/agents/restore-defaults
pub async fn restore_defaults(State(state): State<AppState>) -> Json<Vec<AgentResponse>> {
    state.chain.restore_defaults();
    Json(all_agents(&state))
}
