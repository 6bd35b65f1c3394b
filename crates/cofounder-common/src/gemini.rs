use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CommonError;

const PLACEHOLDER_KEY: &str = "your_gemini_api_key_here";

#[derive(Clone, Debug)]
pub struct GeminiClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl GeminiClientConfig {
    /// Read the Gemini settings from the environment.
    ///
    /// Returns `None` when `GEMINI_API_KEY` is unset, empty, or still the sample
    /// placeholder. Everything else has a default.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY)?;

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let timeout = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let max_error_body_bytes = std::env::var("GEMINI_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Some(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
            max_error_body_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream {
        status: StatusCode,
        message: String,
        reason: Option<String>,
    },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },

    #[error("response contained no text{}", blocked_suffix(.block_reason))]
    EmptyResponse { block_reason: Option<String> },
}

impl GeminiClientError {
    /// Whether the upstream rejected the API key itself.
    ///
    /// Gemini reports a bad key as `400 INVALID_ARGUMENT` with reason `API_KEY_INVALID`,
    /// so the status code alone is not enough.
    pub fn is_invalid_credential(&self) -> bool {
        match self {
            GeminiClientError::Upstream {
                status,
                message,
                reason,
            } => {
                *status == StatusCode::UNAUTHORIZED
                    || *status == StatusCode::FORBIDDEN
                    || mentions_api_key(message)
                    || reason.as_deref().is_some_and(mentions_api_key)
            }
            GeminiClientError::UpstreamBody { status, body } => {
                *status == StatusCode::UNAUTHORIZED
                    || *status == StatusCode::FORBIDDEN
                    || mentions_api_key(body)
            }
            _ => false,
        }
    }
}

fn blocked_suffix(block_reason: &Option<String>) -> String {
    match block_reason {
        Some(reason) => format!(" (blocked: {reason})"),
        None => String::new(),
    }
}

fn mentions_api_key(text: &str) -> bool {
    text.contains("API_KEY") || text.contains("API key not valid")
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiClientConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("ai-cofounder/cofounder-server")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiClientConfig {
        &self.config
    }

    /// Send one `generateContent` call and return the concatenated text of the first
    /// candidate. No retries.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiClientError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        debug!(model = %self.config.model, prompt_chars = prompt.len(), "calling generateContent");
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::to_upstream_error(resp, self.config.max_error_body_bytes).await);
        }

        let body = resp.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&body)?;
        parsed.into_text()
    }

    async fn to_upstream_error(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> GeminiClientError {
        let status = resp.status();
        let body = read_limited_text(resp, max_error_body_bytes).await;
        parse_upstream_error(status, body)
    }
}

fn parse_upstream_error(status: StatusCode, body: String) -> GeminiClientError {
    if let Ok(parsed) = serde_json::from_str::<GeminiErrorEnvelope>(&body) {
        let message = parsed
            .error
            .message
            .unwrap_or_else(|| "unknown upstream error".to_string());
        let reason = parsed
            .error
            .details
            .iter()
            .find_map(|d| d.reason.clone())
            .or(parsed.error.status);
        return GeminiClientError::Upstream {
            status,
            message,
            reason,
        };
    }
    GeminiClientError::UpstreamBody { status, body }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorObject,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorObject {
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, GeminiClientError> {
        let text: Option<String> = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect());

        match text {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(GeminiClientError::EmptyResponse {
                block_reason: self.prompt_feedback.and_then(|f| f.block_reason),
            }),
        }
    }
}
