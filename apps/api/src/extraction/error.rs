use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::extraction::repair::ExtractionParseError;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Parse(#[from] ExtractionParseError),

    /// The AI service rejected our credentials, or none are configured.
    /// Retrying cannot help, so this is never downgraded to a soft failure.
    #[error("AI service authentication failed: {0}")]
    UpstreamAuth(String),
}

/// A field that failed coercion. The field keeps its prior value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub field: String,
    pub value: String,
    pub reason: String,
}

/// Collects validation warnings for one mapping pass, logging each as it lands.
#[derive(Debug, Default)]
pub struct Warnings(Vec<ValidationWarning>);

impl Warnings {
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) {
        let warning = ValidationWarning {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        };
        warn!(
            field = %warning.field,
            value = %warning.value,
            "Ignoring extracted value: {}",
            warning.reason
        );
        self.0.push(warning);
    }

    pub fn into_vec(self) -> Vec<ValidationWarning> {
        self.0
    }
}
