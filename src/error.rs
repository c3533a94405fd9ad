//! Error types for quickpress

use crate::types::{IssueId, JournalId, SectionId, SubmissionId};
use std::fmt;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the intake flow and the store layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Referenced submission does not exist in the journal
    #[error("submission {0} not found")]
    SubmissionNotFound(SubmissionId),

    /// Referenced section does not exist in the journal
    #[error("section {0} not found in journal {1}")]
    SectionNotFound(SectionId, JournalId),

    /// Referenced issue does not exist in the journal
    #[error("issue {0} not found in journal {1}")]
    IssueNotFound(IssueId, JournalId),

    /// The journal has no sections to default a new submission into
    #[error("journal {0} has no sections configured")]
    NoSections(JournalId),

    /// Field-level validation failures; recoverable, re-displayed to the user
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Persistence failure; propagated without retry
    #[error("store error: {0}")]
    Store(String),

    /// Search index failure; propagated without retry
    #[error("search index error: {0}")]
    Index(String),

    /// Anything that indicates a bug in quickpress itself
    #[error("internal error: {0}")]
    Internal(String),
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the error is attached to (e.g. "issueId")
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    /// Build a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The collected validation failures of one form post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Failures in the order the checks ran
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// True when no check failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// The first error attached to `field`, if any
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for err in &self.errors {
            write!(f, "; {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
