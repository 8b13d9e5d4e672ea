//! Gemini REST client
//!
//! Calls `generateContent` directly over HTTPS. Conversation history is
//! sent as prior turns; the role prompt is prepended to the final user
//! turn since the chain agents share one model.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::errors::{AgentError, AgentResult};
use super::model::ModelClient;
use super::prompts::library;
use crate::domain::conversation::{ChatMessage, ChatRole};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Keeps the key out of the URL, and so out of every error message
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Model client backed by the Gemini HTTP API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Build a client with a per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> AgentResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AgentError::CredentialMissing(
                "Gemini API key is empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url,
            temperature: 0.7,
            max_output_tokens: 4096,
        })
    }

    /// Overrides the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Overrides the response length cap
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(
        &self,
        role_prompt: &str,
        input: &str,
        history: &[ChatMessage],
    ) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|message| Content {
                role: gemini_role(message.role).to_string(),
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            })
            .collect();

        let vars = HashMap::from([("role_prompt", role_prompt), ("input", input)]);
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: library::role_turn().render(&vars),
            }],
        });

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> AgentResult<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            AgentError::ModelCall(format!("Failed to parse Gemini response: {}", err.without_url()))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        role_prompt: &str,
        input: &str,
        history: &[ChatMessage],
    ) -> AgentResult<String> {
        let request = self.build_request(role_prompt, input, history);
        self.send_request(&request).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn gemini_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> AgentResult<String> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AgentError::ModelCall(
            "Gemini API returned no text in the response candidates".to_string(),
        ));
    }

    Ok(text)
}

fn map_http_error(status: StatusCode, body: &str) -> AgentError {
    let detail = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => format!("{}: {}", status_text, msg),
                _ => msg,
            }
        })
        .unwrap_or_else(|_| body.to_string());

    AgentError::ModelCall(format!("Gemini API returned {}: {}", status.as_u16(), detail))
}
