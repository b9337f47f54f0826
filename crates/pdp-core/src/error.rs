//! # Error Hierarchy
//!
//! Structured error types for the degree plan engine, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The taxonomy separates three failure classes with different audiences:
//!
//! - [`ConfigurationError`] — a malformed rule tree or restriction set.
//!   Surfaced to the operator who authored the plan, at authoring/import
//!   time, never at request time.
//! - [`RuleViolation`] — a fulfillment write that would exceed a
//!   double-count cap. Recoverable: the write is rejected, prior state is
//!   preserved, and the caller receives the restriction and courses involved.
//! - [`ValidationError`] — a domain primitive (course code, term code,
//!   credit value) that fails format validation at construction time.

use thiserror::Error;

use crate::course::Credits;
use crate::identity::RuleId;

/// Top-level error type for the degree plan engine.
#[derive(Error, Debug)]
pub enum PdpError {
    /// Malformed rule tree, restriction set, or plan descriptor.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A fulfillment write would violate a double-count restriction.
    #[error("rule violation: {0}")]
    RuleViolation(#[from] RuleViolation),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors in the authored configuration of a degree plan.
///
/// These are never recoverable at evaluation time. A plan that fails
/// validation must be corrected by whoever loaded it; the evaluator
/// assumes a validated plan and does not re-check these invariants.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A leaf rule must set at least one of `num` / `credits`.
    #[error("rule {rule} ({title:?}) is a course rule with neither a course nor a credit threshold")]
    LeafWithoutThreshold {
        /// The offending rule.
        rule: RuleId,
        /// The rule's display title (may be empty).
        title: String,
    },

    /// A rule carries a course query and also has children.
    #[error("rule {rule} ({title:?}) has both a course query and child rules")]
    QueryWithChildren {
        /// The offending rule.
        rule: RuleId,
        /// The rule's display title (may be empty).
        title: String,
    },

    /// A rule has neither a course query nor any children.
    #[error("rule {rule} ({title:?}) has neither a course query nor child rules")]
    EmptyRule {
        /// The offending rule.
        rule: RuleId,
        /// The rule's display title (may be empty).
        title: String,
    },

    /// A group rule requires more satisfied children than it has children.
    #[error(
        "rule {rule} ({title:?}) requires {num} satisfied child rules but only has {children}"
    )]
    GroupMinimumExceedsChildren {
        /// The offending group rule.
        rule: RuleId,
        /// The rule's display title (may be empty).
        title: String,
        /// The configured minimum.
        num: u32,
        /// The actual child count.
        children: usize,
    },

    /// A rule references a parent that does not exist in the plan.
    #[error("rule {rule} references unknown parent rule {parent}")]
    UnknownParent {
        /// The orphaned rule.
        rule: RuleId,
        /// The missing parent id.
        parent: RuleId,
    },

    /// A double-count restriction references a rule not in the plan.
    #[error("double-count restriction references unknown rule {rule}")]
    RestrictionUnknownRule {
        /// The missing rule id.
        rule: RuleId,
    },

    /// A double-count restriction must reference two distinct rules.
    #[error("double-count restriction references rule {rule} on both sides")]
    RestrictionSelfReference {
        /// The rule referenced twice.
        rule: RuleId,
    },

    /// A double-count restriction must cap at least one of courses/credits.
    #[error("double-count restriction between {rule} and {other_rule} caps neither courses nor credits")]
    RestrictionWithoutCap {
        /// One side of the restriction.
        rule: RuleId,
        /// The other side of the restriction.
        other_rule: RuleId,
    },

    /// A required plan descriptor field is empty.
    #[error("degree plan descriptor field {field:?} must be non-empty")]
    EmptyDescriptorField {
        /// The name of the empty field.
        field: &'static str,
    },
}

/// A fulfillment write was rejected because it would produce an invalid
/// assignment state.
///
/// The write does not partially apply: the caller's prior fulfillment set
/// is preserved exactly.
#[derive(Error, Debug)]
pub enum RuleViolation {
    /// Too many courses would count toward both restricted rules.
    #[error(
        "{shared} courses ({courses:?}) would count toward both rule {rule} and rule {other_rule}, \
         but at most {max_courses} may double-count"
    )]
    MaxCoursesExceeded {
        /// One restricted rule.
        rule: RuleId,
        /// The other restricted rule.
        other_rule: RuleId,
        /// The configured course cap.
        max_courses: u32,
        /// The number of shared courses the write would produce.
        shared: u32,
        /// Full codes of the shared courses.
        courses: Vec<String>,
    },

    /// Too many credits would count toward both restricted rules.
    #[error(
        "{shared} credits ({courses:?}) would count toward both rule {rule} and rule {other_rule}, \
         but at most {max_credits} may double-count"
    )]
    MaxCreditsExceeded {
        /// One restricted rule.
        rule: RuleId,
        /// The other restricted rule.
        other_rule: RuleId,
        /// The configured credit cap.
        max_credits: Credits,
        /// The credit sum the write would produce across shared courses.
        shared: Credits,
        /// Full codes of the shared courses.
        courses: Vec<String>,
    },

    /// The same (course, semester) pair is already claimed in this plan.
    #[error("course {full_code} ({semester}) is already claimed by another fulfillment")]
    DuplicateFulfillment {
        /// The duplicated course code.
        full_code: String,
        /// The duplicated semester, or `"planned"` if none.
        semester: String,
    },

    /// A fulfillment claims a rule that does not exist in the plan.
    #[error("fulfillment claims unknown rule {rule}")]
    UnknownRule {
        /// The missing rule id.
        rule: RuleId,
    },

    /// A fulfillment claims a group rule; only course rules accept direct claims.
    #[error("fulfillment claims group rule {rule}; courses may only be assigned to course rules")]
    GroupRuleClaim {
        /// The group rule that was claimed.
        rule: RuleId,
    },

    /// A mutation referenced a fulfillment that is not in the plan.
    #[error("unknown fulfillment {fulfillment}")]
    UnknownFulfillment {
        /// The missing fulfillment id.
        fulfillment: crate::identity::FulfillmentId,
    },
}

/// Validation errors for domain primitive newtypes.
///
/// Each primitive enforces format constraints at construction time. These
/// errors carry the invalid input and the expected format so that operators
/// can diagnose malformed catalog data without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Course code does not conform to the `DEPT-NUMBER` full-code format.
    #[error("invalid course code: {0:?} (expected e.g. \"CIS-1200\")")]
    InvalidCourseCode(String),

    /// Term code does not conform to the `YYYYs` format.
    #[error("invalid semester: {0:?} (expected year plus season letter, e.g. \"2024C\")")]
    InvalidSemester(String),

    /// Credit value is not a non-negative decimal with at most two places.
    #[error("invalid credit value {value:?}: {reason}")]
    InvalidCredits {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
