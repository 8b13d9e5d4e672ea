use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::{ChainOutput, TraceEntry};
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::conversation::{ChatMessage, Conversation};

/// Request body for one user turn
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Conversation with its full history
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id(),
            messages: conversation.messages().to_vec(),
            created_at: conversation.created_at(),
            updated_at: conversation.updated_at(),
        }
    }
}

/// One row of the "inference process" view
#[derive(Debug, Serialize, Deserialize)]
pub struct TraceEntryResponse {
    pub index: usize,
    pub label: String,
    pub agent_name: String,
    pub succeeded: bool,
    pub output: String,
}

impl From<&TraceEntry> for TraceEntryResponse {
    fn from(entry: &TraceEntry) -> Self {
        Self {
            index: entry.index,
            label: entry.label(),
            agent_name: entry.agent_name.clone(),
            succeeded: entry.outcome.is_success(),
            output: entry.outcome.display_text(),
        }
    }
}

/// Result of one chain run
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatTurnResponse {
    pub conversation_id: Uuid,
    pub final_output: String,
    pub trace: Vec<TraceEntryResponse>,
}

impl ChatTurnResponse {
    fn new(conversation_id: Uuid, output: &ChainOutput) -> Self {
        Self {
            conversation_id,
            final_output: output.final_output.clone(),
            trace: output.trace.iter().map(TraceEntryResponse::from).collect(),
        }
    }
}

/// Start a new conversation
///
/// POST /api/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ConversationResponse>), ApiError> {
    let conversation = Conversation::new();
    state
        .conversations
        .save(&conversation)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to save conversation: {}", e)))?;

    tracing::info!(conversation_id = %conversation.id(), "Conversation created");

    Ok((StatusCode::CREATED, Json(ConversationResponse::from(&conversation))))
}

/// Get a conversation by ID
///
/// GET /api/conversations/:id
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>, ApiError> {
    let conversation = find_conversation(&state, id).await?;
    Ok(Json(ConversationResponse::from(&conversation)))
}

/// Delete a conversation
///
/// DELETE /api/conversations/:id
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.conversations.delete(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete conversation: {}", e))
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Run the agent chain on a user message
///
/// The chain sees the history as it was before this turn. The question and
/// the (trimmed) final answer are then appended together.
///
/// POST /api/conversations/:id/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::bad_request("Message content cannot be empty"));
    }

    let conversation = find_conversation(&state, id).await?;
    let output = state
        .chain
        .execute(&req.content, conversation.messages())
        .await;

    let mut messages = vec![ChatMessage::user(req.content)];
    let answer = output.final_output.trim();
    if !answer.is_empty() {
        messages.push(ChatMessage::assistant(answer));
    }

    state
        .conversations
        .append_messages(id, messages)
        .await
        .map_err(|e| {
            if e.contains("not found") {
                ApiError::not_found(e)
            } else {
                ApiError::internal_server_error(format!("Failed to record turn: {}", e))
            }
        })?;

    Ok(Json(ChatTurnResponse::new(id, &output)))
}

async fn find_conversation(state: &AppState, id: Uuid) -> Result<Conversation, ApiError> {
    state
        .conversations
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Storage error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Conversation not found: {}", id)))
}
