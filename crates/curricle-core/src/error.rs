use std::fmt;

use thiserror::Error;

/// Core error type for curricle operations.
#[derive(Error, Debug)]
pub enum CurricleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Correct-answer limit reached ({0} allowed)")]
    CorrectAnswerLimit(usize),

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Upload already in flight for draft {0}")]
    UploadInFlight(crate::editor::DraftId),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Course API rejected the request: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CurricleError {
    fn from(e: serde_json::Error) -> Self {
        CurricleError::Serialization(e.to_string())
    }
}

/// Result type alias using CurricleError.
pub type Result<T> = std::result::Result<T, CurricleError>;

/// A single field-level validation problem with an actionable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (e.g. `modules[2].lessons[0].media_url`).
    pub field: String,
    /// Human-readable, user-facing message.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collection of validation issues reported by a single check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Record an issue.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(field, message));
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// All recorded issues.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether any issue was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of recorded issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Consume the report, turning it into an error when non-empty.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CurricleError::Validation(self))
        }
    }

    /// Whether any issue targets the given field path.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_empty_is_ok() {
        let report = ValidationReport::new();
        assert!(report.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_report_collects_issues() {
        let mut report = ValidationReport::new();
        report.push("title", "title is required");
        report.push("media_url", "media is required");

        assert_eq!(report.len(), 2);
        assert!(report.mentions("media_url"));
        assert!(!report.mentions("thumbnail"));

        let err = report.into_result().unwrap_err();
        match err {
            CurricleError::Validation(r) => assert_eq!(r.len(), 2),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_report_display_joins_issues() {
        let mut report = ValidationReport::new();
        report.push("title", "title is required");
        report.push("price", "price must be non-negative");

        let text = report.to_string();
        assert!(text.contains("title: title is required"));
        assert!(text.contains("; price:"));
    }

    #[test]
    fn test_serde_json_error_converts() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: CurricleError = bad.unwrap_err().into();
        assert!(matches!(err, CurricleError::Serialization(_)));
    }
}
