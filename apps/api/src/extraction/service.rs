//! One extraction round trip: prompt, AI call, repair, mapping.
//!
//! Upstream failures other than auth degrade to an empty record with
//! `ai_processed = false` so the caller can still fill the form by hand.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::extraction::candidate::map_candidate;
use crate::extraction::document::UploadedDocument;
use crate::extraction::error::{ExtractionError, ValidationWarning};
use crate::extraction::job::map_job;
use crate::extraction::prompts::{render, JOB_PROMPT_TEMPLATE, RESUME_PROMPT_TEMPLATE};
use crate::extraction::repair::parse_ai_json;
use crate::extraction::Mapped;
use crate::llm_client::{CompletionService, FailureKind, LlmError};
use crate::models::candidate::CanonicalCandidateProfile;
use crate::models::form_schema::{missing_required, FormRecord};
use crate::models::job::CanonicalJobPosting;

pub const OVERLOADED_MESSAGE: &str = "AI service is temporarily overloaded. File uploaded successfully - \
    please fill the form manually. You can try uploading again later for auto-fill.";
pub const QUOTA_MESSAGE: &str =
    "AI service quota exceeded. File uploaded successfully - please fill the form manually.";
pub const FAILED_MESSAGE: &str =
    "AI processing encountered an error. File uploaded successfully - please fill the form manually.";

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome<T> {
    pub extracted: T,
    pub ai_processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub warnings: Vec<ValidationWarning>,
    pub missing_required: Vec<String>,
}

impl<T: FormRecord + Default> ExtractionOutcome<T> {
    fn processed(mapped: Mapped<T>) -> Self {
        let missing_required = missing_required(&mapped.value);
        Self {
            extracted: mapped.value,
            ai_processed: true,
            message: None,
            warnings: mapped.warnings,
            missing_required,
        }
    }

    fn degraded(message: &str) -> Self {
        let extracted = T::default();
        let missing_required = missing_required(&extracted);
        Self {
            extracted,
            ai_processed: false,
            message: Some(message.to_string()),
            warnings: Vec::new(),
            missing_required,
        }
    }
}

pub async fn extract_candidate(
    ai: &dyn CompletionService,
    document: &UploadedDocument,
    prior: CanonicalCandidateProfile,
) -> Result<ExtractionOutcome<CanonicalCandidateProfile>, ExtractionError> {
    extract(ai, document, RESUME_PROMPT_TEMPLATE, |value| map_candidate(prior, value)).await
}

pub async fn extract_job(
    ai: &dyn CompletionService,
    document: &UploadedDocument,
    prior: CanonicalJobPosting,
) -> Result<ExtractionOutcome<CanonicalJobPosting>, ExtractionError> {
    extract(ai, document, JOB_PROMPT_TEMPLATE, |value| map_job(prior, value)).await
}

async fn extract<T, F>(
    ai: &dyn CompletionService,
    document: &UploadedDocument,
    template: &str,
    map: F,
) -> Result<ExtractionOutcome<T>, ExtractionError>
where
    T: FormRecord + Default,
    F: FnOnce(&Value) -> Mapped<T>,
{
    let prompt = render(template, document.source_label(), document.text());

    let raw = match ai.complete(&prompt, document.attachment()).await {
        Ok(raw) => raw,
        Err(e) => return degrade(e).map(ExtractionOutcome::<T>::degraded),
    };

    let value = parse_ai_json(&raw)?;
    let outcome = ExtractionOutcome::processed(map(&value));
    info!(
        file = %document.file_name,
        warnings = outcome.warnings.len(),
        missing = outcome.missing_required.len(),
        "Extraction complete"
    );
    Ok(outcome)
}

/// Picks the advisory message for a recoverable failure; auth stays an error.
fn degrade(e: LlmError) -> Result<&'static str, ExtractionError> {
    match e.kind() {
        FailureKind::Auth => {
            error!("AI service rejected credentials: {e}");
            Err(ExtractionError::UpstreamAuth(e.to_string()))
        }
        FailureKind::Overloaded => {
            warn!("AI service overloaded: {e}");
            Ok(OVERLOADED_MESSAGE)
        }
        FailureKind::QuotaExceeded => {
            warn!("AI service quota exceeded: {e}");
            Ok(QUOTA_MESSAGE)
        }
        FailureKind::Other => {
            warn!("AI processing failed: {e}");
            Ok(FAILED_MESSAGE)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::Attachment;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Canned AI service. Records the last prompt it saw.
    pub(crate) struct StubAi {
        reply: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
        pub last_prompt: Mutex<Option<String>>,
        pub saw_attachment: Mutex<bool>,
    }

    impl StubAi {
        pub(crate) fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::with(move || Ok(text.clone()))
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            let message = message.to_string();
            Self::with(move || {
                Err(LlmError::Api {
                    status,
                    message: message.clone(),
                })
            })
        }

        pub(crate) fn with(reply: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
            Self {
                reply: Box::new(reply),
                last_prompt: Mutex::new(None),
                saw_attachment: Mutex::new(false),
            }
        }
    }

    #[async_trait]
    impl CompletionService for StubAi {
        async fn complete(&self, prompt: &str, attachment: Option<&Attachment>) -> Result<String, LlmError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            *self.saw_attachment.lock().unwrap() = attachment.is_some();
            (self.reply)()
        }
    }

    fn text_doc(text: &str) -> UploadedDocument {
        UploadedDocument::from_text(text.to_string()).unwrap()
    }

    fn prior_profile() -> CanonicalCandidateProfile {
        CanonicalCandidateProfile {
            first_name: Some("Asha".into()),
            email: Some("asha@example.com".into()),
            skills: vec!["Go".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_candidate_extraction_from_fenced_reply() {
        let ai = StubAi::replying(
            "```json\n{\"name\": \"Asha Rao\", \"phone\": \"+91 98450 00000\", \"skills\": [\"Rust\", \"SQL\"]}\n```",
        );
        let outcome = extract_candidate(&ai, &text_doc("Asha Rao resume"), prior_profile())
            .await
            .unwrap();

        assert!(outcome.ai_processed);
        assert!(outcome.message.is_none());
        assert_eq!(outcome.extracted.last_name.as_deref(), Some("Rao"));
        assert_eq!(outcome.extracted.email.as_deref(), Some("asha@example.com"));
        assert_eq!(outcome.extracted.skills, vec!["Rust", "SQL"]);
        assert!(outcome.missing_required.contains(&"date_of_birth".to_string()));
        assert!(!outcome.missing_required.contains(&"email".to_string()));

        let prompt = ai.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("this resume text"));
        assert!(prompt.contains("Asha Rao resume"));
        assert!(!*ai.saw_attachment.lock().unwrap());
    }

    #[tokio::test]
    async fn test_overloaded_degrades_to_empty_profile() {
        let ai = StubAi::failing(503, "The model is overloaded. Please try again later.");
        let outcome = extract_candidate(&ai, &text_doc("resume"), prior_profile())
            .await
            .unwrap();
        assert!(!outcome.ai_processed);
        assert_eq!(outcome.extracted, CanonicalCandidateProfile::default());
        assert_eq!(outcome.message.as_deref(), Some(OVERLOADED_MESSAGE));
    }

    #[tokio::test]
    async fn test_quota_degrades_to_empty_posting() {
        let ai = StubAi::failing(429, "RESOURCE_EXHAUSTED: quota");
        let outcome = extract_job(&ai, &text_doc("JD"), CanonicalJobPosting::default())
            .await
            .unwrap();
        assert!(!outcome.ai_processed);
        assert_eq!(outcome.extracted, CanonicalJobPosting::default());
        assert_eq!(outcome.message.as_deref(), Some(QUOTA_MESSAGE));
        assert!(outcome.missing_required.contains(&"title".to_string()));
    }

    #[tokio::test]
    async fn test_other_failures_degrade_too() {
        let ai = StubAi::with(|| Err(LlmError::EmptyContent));
        let outcome = extract_job(&ai, &text_doc("JD"), CanonicalJobPosting::default())
            .await
            .unwrap();
        assert_eq!(outcome.message.as_deref(), Some(FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_auth_failure_is_not_downgraded() {
        let ai = StubAi::with(|| Err(LlmError::NotConfigured));
        let err = extract_candidate(&ai, &text_doc("resume"), prior_profile())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UpstreamAuth(_)));

        let ai = StubAi::failing(400, "API key not valid. Please pass a valid API key.");
        let err = extract_job(&ai, &text_doc("JD"), CanonicalJobPosting::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UpstreamAuth(_)));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_parse_error() {
        let ai = StubAi::replying("Sorry, I cannot read this document.");
        let err = extract_job(&ai, &text_doc("JD"), CanonicalJobPosting::default())
            .await
            .unwrap_err();
        match err {
            ExtractionError::Parse(e) => assert!(e.raw_snippet.starts_with("Sorry")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
