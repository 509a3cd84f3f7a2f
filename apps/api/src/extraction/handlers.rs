use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::document::{DocumentError, UploadedDocument};
use crate::extraction::error::ValidationWarning;
use crate::extraction::service::{extract_candidate, extract_job, ExtractionOutcome};
use crate::models::candidate::CanonicalCandidateProfile;
use crate::models::form_schema::{FieldSpec, FormKind};
use crate::models::job::CanonicalJobPosting;
use crate::state::AppState;

/// Response body for every upload / extract endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse<T> {
    pub success: bool,
    pub file_name: String,
    pub extracted_data: T,
    pub ai_processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub warnings: Vec<ValidationWarning>,
    pub missing_required: Vec<String>,
}

impl<T> UploadResponse<T> {
    fn new(file_name: String, outcome: ExtractionOutcome<T>) -> Self {
        Self {
            success: true,
            file_name,
            extracted_data: outcome.extracted,
            ai_processed: outcome.ai_processed,
            message: outcome.message,
            warnings: outcome.warnings,
            missing_required: outcome.missing_required,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextExtractRequest<T> {
    pub text: String,
    #[serde(default)]
    pub current: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct FormSchemaResponse {
    pub form: FormKind,
    pub fields: &'static [FieldSpec],
}

/// POST /api/v1/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse<CanonicalCandidateProfile>>, AppError> {
    let (document, current) = read_upload::<CanonicalCandidateProfile>(multipart).await?;
    info!(file = %document.file_name, "Resume upload received");
    let outcome = extract_candidate(state.ai.as_ref(), &document, current).await?;
    Ok(Json(UploadResponse::new(document.file_name, outcome)))
}

/// POST /api/v1/upload-job-description
pub async fn handle_upload_job_description(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse<CanonicalJobPosting>>, AppError> {
    let (document, current) = read_upload::<CanonicalJobPosting>(multipart).await?;
    info!(file = %document.file_name, "Job description upload received");
    let outcome = extract_job(state.ai.as_ref(), &document, current).await?;
    Ok(Json(UploadResponse::new(document.file_name, outcome)))
}

/// POST /api/v1/extract/resume-text
pub async fn handle_extract_resume_text(
    State(state): State<AppState>,
    Json(req): Json<TextExtractRequest<CanonicalCandidateProfile>>,
) -> Result<Json<UploadResponse<CanonicalCandidateProfile>>, AppError> {
    let document = UploadedDocument::from_text(req.text)?;
    let outcome = extract_candidate(state.ai.as_ref(), &document, req.current.unwrap_or_default()).await?;
    Ok(Json(UploadResponse::new(document.file_name, outcome)))
}

/// POST /api/v1/extract/job-text
pub async fn handle_extract_job_text(
    State(state): State<AppState>,
    Json(req): Json<TextExtractRequest<CanonicalJobPosting>>,
) -> Result<Json<UploadResponse<CanonicalJobPosting>>, AppError> {
    let document = UploadedDocument::from_text(req.text)?;
    let outcome = extract_job(state.ai.as_ref(), &document, req.current.unwrap_or_default()).await?;
    Ok(Json(UploadResponse::new(document.file_name, outcome)))
}

/// GET /api/v1/forms/:form
pub async fn handle_get_form(Path(form): Path<String>) -> Result<Json<FormSchemaResponse>, AppError> {
    let form = match form.as_str() {
        "job" => FormKind::Job,
        "candidate" => FormKind::Candidate,
        other => return Err(AppError::NotFound(format!("Form '{other}' not found"))),
    };
    Ok(Json(FormSchemaResponse {
        form,
        fields: form.fields(),
    }))
}

/// Reads the `file` part and the optional `current` JSON record from a
/// multipart upload. Unknown parts are ignored.
async fn read_upload<T>(mut multipart: Multipart) -> Result<(UploadedDocument, T), AppError>
where
    T: DeserializeOwned + Default,
{
    let mut document = None;
    let mut current = T::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                document = Some(UploadedDocument::from_upload(
                    file_name,
                    content_type.as_deref(),
                    data,
                )?);
            }
            Some("current") => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    current = serde_json::from_str(&text)
                        .map_err(|e| AppError::Validation(format!("Invalid 'current' record: {e}")))?;
                }
            }
            _ => {}
        }
    }

    let document = document.ok_or(DocumentError::Missing)?;
    Ok((document, current))
}
