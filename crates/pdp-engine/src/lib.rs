//! # pdp-engine — Degree Requirement Evaluation
//!
//! The core of the degree plan engine: the requirement rule tree, the
//! student's fulfillment set, and the satisfaction evaluator that decides
//! which requirements a set of completed/planned courses meets.
//!
//! ## Architecture
//!
//! ```text
//! pdp-core (primitives)  -->  pdp-engine (evaluation)  -->  pdp-audit (seeding)
//!   CourseQuery                 DegreePlan / Rule              Translator
//!   CourseRecord                UserDegreePlan                 AuditDocument
//!   Credits                     SatisfactionEvaluator
//! ```
//!
//! - [`DegreePlan`] owns a forest of [`Rule`] nodes in an arena keyed by
//!   `RuleId` (parent pointers, no object back-references) together with the
//!   plan's [`DoubleCountRestriction`]s.
//! - [`UserDegreePlan`] holds one student's [`Fulfillment`]s. Mutations are
//!   atomic: a write that would exceed a double-count cap is rejected with a
//!   `RuleViolation` and leaves prior state untouched.
//! - [`SatisfactionEvaluator`] produces a per-rule [`SatisfactionReport`]
//!   from a validated plan and a fulfillment set. Evaluation is a pure,
//!   synchronous tree traversal with no hidden state.

pub mod fulfillment;
pub mod plan;
pub mod rule;
pub mod satisfaction;

// Re-export primary types.
pub use fulfillment::{check_restrictions, Fulfillment, UserDegreePlan};
pub use plan::{DegreePlan, DoubleCountRestriction, PlanDescriptor};
pub use rule::{Rule, RuleBody};
pub use satisfaction::{SatisfactionEvaluator, SatisfactionReport, SatisfactionStatus};
