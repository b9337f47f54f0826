#![deny(missing_docs)]

//! # pdp-core — Foundational Types for the Penn Degree Plan Engine
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a distinct
//!    type. You cannot pass a [`RuleId`] where a [`FulfillmentId`] is expected,
//!    and a [`CourseCode`] or [`Semester`] that exists has already passed format
//!    validation.
//!
//! 2. **[`Credits`] is exact.** Course units are stored as an integer count of
//!    hundredths. Floats are rejected at every boundary, so credit sums compare
//!    exactly and threshold checks never depend on floating-point rounding.
//!
//! 3. **[`CourseQuery`] is an AST, not a string.** The course-matching
//!    predicate is a tagged-variant tree evaluated structurally. Nothing
//!    re-parses an expression language at evaluation time.
//!
//! 4. **[`PdpError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod course;
pub mod error;
pub mod identity;
pub mod query;

// Re-export primary types at crate root for ergonomic imports.
pub use course::{CourseCode, CourseRecord, Credits, Semester};
pub use error::{ConfigurationError, PdpError, RuleViolation, ValidationError};
pub use identity::{DegreePlanId, FulfillmentId, RestrictionId, RuleId, UserDegreePlanId};
pub use query::CourseQuery;
