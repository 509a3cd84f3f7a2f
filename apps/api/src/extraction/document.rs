//! Upload intake: decides how a document reaches the AI service.
//!
//! PDFs and images travel as inline attachments; plain text and the text of
//! Word files are embedded in the prompt.

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use crate::extraction::docx;
use crate::llm_client::Attachment;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("No file uploaded")]
    Missing,

    #[error("Invalid file type: {0}")]
    UnsupportedType(String),

    #[error("Failed to parse Word document. Please try converting to text or image format.")]
    WordDocument,

    #[error("Text file is not valid UTF-8")]
    InvalidText,

    #[error("Document is empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub enum DocumentContent {
    Attachment(Attachment),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content: DocumentContent,
}

impl UploadedDocument {
    /// Validates an uploaded file. `content_type` may carry parameters
    /// (`text/plain; charset=utf-8`); when it is missing the extension decides.
    pub fn from_upload(
        file_name: String,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<Self, DocumentError> {
        if data.is_empty() {
            return Err(DocumentError::Empty);
        }

        let mime_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
            .or_else(|| mime_from_extension(&file_name).map(str::to_string))
            .ok_or_else(|| DocumentError::UnsupportedType("unknown".to_string()))?;

        if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(DocumentError::UnsupportedType(mime_type));
        }

        let content = match mime_type.as_str() {
            "text/plain" => {
                let text = String::from_utf8(data.to_vec()).map_err(|_| DocumentError::InvalidText)?;
                if text.trim().is_empty() {
                    return Err(DocumentError::Empty);
                }
                DocumentContent::Text(text)
            }
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                let text = docx::extract_text(&data).map_err(|e| {
                    warn!(file = %file_name, "Word document parsing failed: {e}");
                    DocumentError::WordDocument
                })?;
                if text.trim().is_empty() {
                    return Err(DocumentError::Empty);
                }
                DocumentContent::Text(text)
            }
            _ => DocumentContent::Attachment(Attachment { mime_type, data }),
        };

        Ok(Self { file_name, content })
    }

    /// Pasted text, not backed by a file.
    pub fn from_text(text: String) -> Result<Self, DocumentError> {
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            file_name: "pasted-text.txt".to_string(),
            content: DocumentContent::Text(text),
        })
    }

    /// How the prompt refers to the document.
    pub fn source_label(&self) -> &'static str {
        match &self.content {
            DocumentContent::Text(_) => "text",
            DocumentContent::Attachment(a) if a.mime_type == "application/pdf" => "PDF",
            DocumentContent::Attachment(_) => "image",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            DocumentContent::Text(text) => Some(text),
            DocumentContent::Attachment(_) => None,
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match &self.content {
            DocumentContent::Attachment(a) => Some(a),
            DocumentContent::Text(_) => None,
        }
    }
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "txt" => Some("text/plain"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}
