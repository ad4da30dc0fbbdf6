//! Error types for the form engine.
//!
//! Two disjoint kinds reach callers: malformed JSON text ([`FormError::Json`])
//! and structural schema defects ([`SchemaValidationError`]). Submission-time
//! failures are reported separately through [`SubmissionError`].

/// Aggregate structural failure of a candidate form document.
///
/// `errors` is never empty and lists defects in document order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema validation failed with {} error(s)", .errors.len())]
pub struct SchemaValidationError {
    /// Human-readable defects, in the order they were found.
    pub errors: Vec<String>,
}

impl SchemaValidationError {
    /// Build a failure carrying exactly one defect.
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// Whether any defect contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }
}

/// Failure to turn raw text into an accepted form document.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The input text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON is well-formed but violates the form grammar.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

/// A `type` tag outside the closed set of field types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

/// One rejected value within a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Id of the field whose value was rejected.
    pub field_id: String,
    /// Human-readable reason.
    pub message: String,
}

/// Every rejected value of a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission failed with {} issue(s)", .issues.len())]
pub struct SubmissionError {
    /// Issues in field order; a field may contribute more than one.
    pub issues: Vec<FieldIssue>,
}

impl SubmissionError {
    /// Messages reported for a single field.
    #[must_use]
    pub fn messages_for(&self, field_id: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.field_id == field_id)
            .map(|issue| issue.message.as_str())
            .collect()
    }

    /// Whether the given field was rejected.
    #[must_use]
    pub fn has_field(&self, field_id: &str) -> bool {
        self.issues.iter().any(|issue| issue.field_id == field_id)
    }
}
