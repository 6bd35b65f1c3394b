use cofounder_common::gemini::GeminiClientConfig;

use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
///
/// The Gemini key is optional at startup: without it the server still serves
/// `/api/health` and answers every generation request with a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (default `0.0.0.0`).
    pub host: String,
    /// Port to bind (default `3001`).
    pub port: u16,
    /// `None` when `GEMINI_API_KEY` is missing or still the placeholder.
    pub gemini: Option<GeminiClientConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HOST`, `PORT`: listen address
    /// - `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`, `GEMINI_TIMEOUT_SECS`,
    ///   `GEMINI_MAX_ERROR_BODY_BYTES`: generation backend
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        Ok(Self {
            host,
            port,
            gemini: GeminiClientConfig::from_env(),
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, AppError> {
    match raw {
        None => Ok(3001),
        Some(s) => s
            .trim()
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("PORT must be a valid port number, got {s:?}: {e}"))),
    }
}
