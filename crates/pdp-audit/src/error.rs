//! Audit-specific error types.
//!
//! Structured errors for DegreeWorks document loading and translation.
//! All errors carry context (file paths, rule labels, the offending values)
//! to support diagnosing malformed audit exports without re-running the
//! translation under a debugger.

use std::path::PathBuf;

use thiserror::Error;

use pdp_core::ConfigurationError;

/// Errors that can occur while loading or translating an audit document.
#[derive(Debug, Error)]
pub enum AuditError {
    /// JSON parsing failed for a specific file.
    ///
    /// An unrecognized `ruleType` tag also surfaces here: the document
    /// model is a closed sum type, so serde rejects unknown variants and
    /// names the tag in the error. The translator never guesses.
    #[error("failed to parse audit JSON at {path}: {source}")]
    JsonParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying serde error (names the unknown variant/field).
        source: serde_json::Error,
    },

    /// A required file was not found.
    #[error("audit file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A course rule carries neither `classesBegin` nor `creditsBegin`.
    #[error("course rule {label:?} has neither a class count nor a credit threshold")]
    MissingThreshold {
        /// The rule's display label.
        label: String,
    },

    /// A range end value appeared without its begin value.
    #[error("course rule {label:?} has {kind}End without {kind}Begin")]
    EndWithoutBegin {
        /// The rule's display label.
        label: String,
        /// Which range: `"classes"` or `"credits"`.
        kind: &'static str,
    },

    /// A numeric threshold field failed to parse.
    #[error("course rule {label:?}: invalid {kind} value {value:?}")]
    InvalidThreshold {
        /// The rule's display label.
        label: String,
        /// Which field failed: `"classesBegin"`, `"creditsEnd"`, ….
        kind: &'static str,
        /// The unparseable value.
        value: String,
    },

    /// A group rule's `numberOfGroups` failed to parse.
    #[error("group rule {label:?}: invalid numberOfGroups value {value:?}")]
    InvalidGroupCount {
        /// The rule's display label.
        label: String,
        /// The unparseable value.
        value: String,
    },

    /// A course-array entry resolves to neither a discipline nor a number.
    #[error(
        "course rule {label:?}: entry with discipline {discipline:?} and number {number:?} \
         cannot be resolved to a course query"
    )]
    UnresolvableCourseEntry {
        /// The rule's display label.
        label: String,
        /// The entry's discipline field.
        discipline: String,
        /// The entry's number field.
        number: String,
    },

    /// A school/college filter referenced a code outside the lookup table.
    #[error("unknown school code {code:?} in course filter")]
    UnknownSchool {
        /// The unrecognized school code.
        code: String,
    },

    /// The translated plan failed rule-tree validation.
    #[error("translated plan is malformed: {0}")]
    Configuration(#[from] ConfigurationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// An `IfStmt` condition the translator cannot decide.
///
/// Unlike [`AuditError`], this is recoverable: the caller logs it and skips
/// the conditional branch, and translation of the remaining rules continues.
#[derive(Debug, Error)]
#[error("unknowable condition on {attribute:?}: {reason}")]
pub struct UnknowableCondition {
    /// The left-hand attribute (or a description of the malformed shape).
    pub attribute: String,
    /// Why the condition could not be decided.
    pub reason: String,
}
