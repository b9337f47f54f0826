//! # Validate Subcommand
//!
//! Re-runs rule-tree validation on a stored degree plan file. Plans are
//! validated when translated, but serde deserialization bypasses the
//! authoring methods, so anything loaded from storage must be checked
//! again before it is trusted by an evaluator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pdp_engine::DegreePlan;

/// Arguments for the `pdp validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to a translated degree plan JSON file.
    #[arg(value_name = "PLAN")]
    pub plan: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 when the plan is well-formed, 1 when validation
/// fails; unreadable files surface as errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let content = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("failed to read {}", args.plan.display()))?;
    let plan: DegreePlan = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", args.plan.display()))?;

    match plan.validate() {
        Ok(()) => {
            println!(
                "OK: {} ({} rules, {} restrictions)",
                plan.descriptor(),
                plan.rule_count(),
                plan.restrictions().len()
            );
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {} — {e}", args.plan.display());
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pdp_core::CourseQuery;
    use pdp_engine::PlanDescriptor;

    fn valid_plan() -> DegreePlan {
        let mut plan = DegreePlan::new(PlanDescriptor {
            program: "EU_BSE".to_string(),
            degree: "BSE".to_string(),
            major: "CSCI".to_string(),
            concentration: None,
            year: 2024,
        })
        .unwrap();
        plan.add_course_rule(
            None,
            "CIS courses",
            Some(1),
            None,
            CourseQuery::Department("CIS".to_string()),
        )
        .unwrap();
        plan
    }

    #[test]
    fn valid_plan_passes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&valid_plan()).unwrap()).unwrap();
        let code = run_validate(&ValidateArgs {
            plan: file.path().to_path_buf(),
        })
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn malformed_plan_fails_with_code_1() {
        // Strip the leaf's threshold so validation must fail.
        let mut value = serde_json::to_value(valid_plan()).unwrap();
        value["rules"][0].as_object_mut().unwrap().remove("num");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        let code = run_validate(&ValidateArgs {
            plan: file.path().to_path_buf(),
        })
        .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let result = run_validate(&ValidateArgs {
            plan: PathBuf::from("/nonexistent/plan.json"),
        });
        assert!(result.is_err());
    }
}
