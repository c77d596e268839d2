use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::PolicyQaError;
use crate::config::GeminiConfig;

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Sends `prompt` as a single-turn request and returns the first candidate's
    /// first text part unchanged.
    pub async fn generate(&self, prompt: &str) -> Result<String, PolicyQaError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        debug!(endpoint = %self.endpoint, prompt_chars = prompt.len(), "sending gemini request");
        let response = request
            .send()
            .await
            .map_err(|err| PolicyQaError::Transport(err.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|err| PolicyQaError::Transport(err.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "gemini request rejected");
            return Err(PolicyQaError::Api {
                status: status.as_u16(),
                body: raw,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|err| PolicyQaError::MalformedResponse(err.to_string()))?;

        parsed.first_text()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Result<String, PolicyQaError> {
        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            PolicyQaError::MalformedResponse("response contained no candidates".to_string())
        })?;
        let content = candidate.content.ok_or_else(|| {
            PolicyQaError::MalformedResponse("first candidate has no content".to_string())
        })?;
        content
            .parts
            .into_iter()
            .next()
            .and_then(|part| part.text)
            .ok_or_else(|| {
                PolicyQaError::MalformedResponse("first candidate has no text part".to_string())
            })
    }
}
