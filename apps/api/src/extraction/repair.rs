//! JSON recovery for AI responses.
//!
//! The model is asked for bare JSON but routinely wraps it in code fences,
//! prefixes it with prose, or trails off mid-sentence. Recovery is:
//! fence strip → direct parse → outermost `{ … }` slice → give up.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Characters of the raw response kept for diagnostics.
pub const RAW_SNIPPET_CHARS: usize = 1000;

/// The AI response could not be turned into JSON.
#[derive(Debug, Clone, Error)]
#[error("Failed to parse AI response: {details}")]
pub struct ExtractionParseError {
    /// First `RAW_SNIPPET_CHARS` characters of the response.
    pub raw_snippet: String,
    /// Message of the first parse failure.
    pub details: String,
}

/// Parses the text returned by the AI service into a JSON tree.
pub fn parse_ai_json(raw: &str) -> Result<Value, ExtractionParseError> {
    let text = strip_json_fences(raw);

    let direct_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    debug!("Direct JSON parse failed ({direct_err}), trying brace slice");

    if let Some(candidate) = outermost_object(text) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => warn!("Brace-slice JSON parse also failed: {e}"),
        }
    } else {
        warn!("AI response contains no JSON object");
    }

    Err(ExtractionParseError {
        raw_snippet: raw.chars().take(RAW_SNIPPET_CHARS).collect(),
        details: direct_err.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Largest `{ … }` slice: first opening brace through last closing brace.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
