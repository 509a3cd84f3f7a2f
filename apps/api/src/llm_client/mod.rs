/// LLM Client: the single point of entry for all Gemini API calls.
///
/// No other module talks to the AI service directly; extraction goes through
/// the [`CompletionService`] trait so handlers can be exercised with a stub.
///
/// Model: gemini-1.5-flash (hardcoded, not configurable)
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const MODEL: &str = "gemini-1.5-flash";

const SYSTEM_INSTRUCTION: &str = "You extract structured data from recruiting documents. \
    Respond with a single JSON object and nothing else. \
    Use null or an empty array for anything the document does not state.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,
}

/// How the caller should treat a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Overloaded,
    QuotaExceeded,
    Auth,
    Other,
}

impl LlmError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LlmError::NotConfigured => FailureKind::Auth,
            LlmError::Api { status, message } => classify(Some(*status), message),
            LlmError::Http(e) => classify(e.status().map(|s| s.as_u16()), &e.to_string()),
            LlmError::EmptyContent => FailureKind::Other,
        }
    }
}

fn classify(status: Option<u16>, message: &str) -> FailureKind {
    let message = message.to_lowercase();
    if status == Some(503) || message.contains("overloaded") {
        FailureKind::Overloaded
    } else if status == Some(429)
        || message.contains("quota")
        || message.contains("limit")
        || message.contains("resource_exhausted")
    {
        FailureKind::QuotaExceeded
    } else if matches!(status, Some(401 | 403))
        || message.contains("api key")
        || message.contains("unauthorized")
    {
        FailureKind::Auth
    } else {
        FailureKind::Other
    }
}

/// A binary document sent alongside the prompt.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Bytes,
}

/// Text-in, text-out completion. Implementations make exactly one upstream call.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, attachment: Option<&Attachment>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini `generateContent` client. Without an API key every call fails as
/// [`LlmError::NotConfigured`], which callers treat as an auth failure.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    /// No request timeout: a slow model answer is awaited to completion.
    pub fn new(api_key: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes one raw call to the Gemini API. No retries.
    pub async fn call(
        &self,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<GenerateResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let mut parts = vec![GeminiPart::Text { text: prompt }];
        if let Some(doc) = attachment {
            parts.push(GeminiPart::Inline {
                inline_data: InlineData {
                    mime_type: &doc.mime_type,
                    data: STANDARD.encode(&doc.data),
                },
            });
        }

        let request_body = GenerateRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts,
            }],
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            // Keep the upstream status code (e.g. RESOURCE_EXHAUSTED) in the message for classification
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| match e.error.status {
                    Some(code) => format!("{code}: {}", e.error.message),
                    None => e.error.message,
                })
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(generated)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, prompt: &str, attachment: Option<&Attachment>) -> Result<String, LlmError> {
        let response = self.call(prompt, attachment).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}
