use serde::{Deserialize, Deserializer, Serialize};

use crate::prompt::Mode;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Free-text startup idea. Must be non-empty after trimming. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub idea: String,
    /// `true` selects the judge pitch template instead of the co-founder plan.
    #[serde(default)]
    pub judge_mode: bool,
}

impl GenerateRequest {
    pub fn new(idea: impl Into<String>, mode: Mode) -> Self {
        Self {
            idea: idea.into(),
            judge_mode: mode == Mode::Judge,
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_judge_flag(self.judge_mode)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A titled block of the generated markdown, delimited by a `##` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Parsed output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub raw: String,
    pub sections: Vec<Section>,
    pub mode: Mode,
}

/// Success body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: GenerationResult,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Failure body shared by every error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}
