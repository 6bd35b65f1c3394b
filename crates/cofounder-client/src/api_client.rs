use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use cofounder_common::api::{ErrorBody, GenerateRequest, GenerateResponse, GenerationResult};
use cofounder_common::error::CommonError;
use cofounder_common::prompt::Mode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

/// Anything that can answer a `POST /api/generate`.
#[async_trait]
pub trait GenerateApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError>;
}

/// reqwest-backed client for a running `cofounder-server`.
#[derive(Clone)]
pub struct HttpGenerateApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGenerateApi {
    pub fn new(base_url: &str) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("ai-cofounder/cofounder-client")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL from `COFOUNDER_API_URL`, defaulting to a local server.
    pub fn from_env() -> Result<Self, CommonError> {
        let base_url = std::env::var("COFOUNDER_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerateApi for HttpGenerateApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ClientError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(%url, mode = %request.mode(), "posting idea");

        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        decode_response(status, &body, request.mode())
    }
}

fn decode_response(
    status: StatusCode,
    body: &[u8],
    mode: Mode,
) -> Result<GenerationResult, ClientError> {
    if status.is_success() {
        let parsed: GenerateResponse = serde_json::from_slice(body)?;
        return Ok(parsed.result);
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| fallback_message(mode).to_string());
    Err(ClientError::Api { status, message })
}

fn fallback_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Cofounder => "Something went wrong",
        Mode::Judge => "Failed to generate judge pitch",
    }
}
