//! # pdp-cli — CLI Tool for the Penn Degree Plan Engine
//!
//! Provides the `pdp` command-line interface for the offline half of the
//! degree plan pipeline: translating DegreeWorks audit exports into rule
//! trees and re-validating stored plans.
//!
//! ## Subcommands
//!
//! - `pdp translate` — Translate an audit export against a plan descriptor
//!   and emit the resulting degree plan as JSON.
//! - `pdp validate` — Re-run rule-tree validation on a stored plan file.
//!
//! ```bash
//! pdp translate audit.json --program EU_BSE --degree BSE --major CSCI --year 2024 -o plan.json
//! pdp validate plan.json
//! ```

pub mod translate;
pub mod validate;
