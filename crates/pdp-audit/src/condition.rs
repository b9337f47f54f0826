//! # Translation-Time Condition Evaluation
//!
//! `IfStmt` conditions compare the target plan's descriptor fields against
//! literals. They are decided once, during translation, against the
//! [`PlanDescriptor`] the translator was constructed with — never at
//! evaluation time, so a translated rule tree carries no conditionals.
//!
//! A condition the translator cannot decide (an unsupported left-hand
//! attribute or comparator) is an [`UnknowableCondition`]: the caller logs
//! it and skips the conditional construct rather than guessing a branch.

use pdp_engine::PlanDescriptor;

use crate::dto::{Condition, RelationalOperator};
use crate::error::UnknowableCondition;

/// Decide a condition tree against a plan descriptor.
///
/// # Errors
///
/// Returns [`UnknowableCondition`] when any relational node references an
/// attribute or comparator the translator does not support. Unknowability
/// propagates upward: a connector node over an unknowable side is itself
/// unknowable, since neither branch choice would be justified.
pub fn evaluate(
    condition: &Condition,
    descriptor: &PlanDescriptor,
) -> Result<bool, UnknowableCondition> {
    if let Some(rel) = &condition.relational_operator {
        return evaluate_relational(rel, descriptor);
    }

    match (&condition.left_condition, &condition.right_condition) {
        (Some(left), Some(right)) => {
            let connector = condition
                .connector
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_uppercase();
            let l = evaluate(left, descriptor)?;
            let r = evaluate(right, descriptor)?;
            match connector.as_str() {
                "AND" => Ok(l && r),
                "OR" => Ok(l || r),
                other => Err(UnknowableCondition {
                    attribute: other.to_string(),
                    reason: "unsupported condition connector".to_string(),
                }),
            }
        }
        // A single wrapped sub-condition is just grouping.
        (Some(left), None) => evaluate(left, descriptor),
        _ => Err(UnknowableCondition {
            attribute: String::new(),
            reason: "condition has neither a relational operator nor sub-conditions".to_string(),
        }),
    }
}

fn evaluate_relational(
    rel: &RelationalOperator,
    descriptor: &PlanDescriptor,
) -> Result<bool, UnknowableCondition> {
    let attribute = rel.left.trim().to_uppercase();
    let actual: &str = match attribute.as_str() {
        "MAJOR" => &descriptor.major,
        "CONC" | "CONCENTRATION" => descriptor.concentration.as_deref().unwrap_or(""),
        "PROGRAM" => &descriptor.program,
        "DEGREE" => &descriptor.degree,
        _ => {
            return Err(UnknowableCondition {
                attribute,
                reason: "unsupported left-hand attribute".to_string(),
            })
        }
    };

    let expected = rel.right.trim();
    let equal = actual.eq_ignore_ascii_case(expected);
    match rel.operator.trim() {
        "=" => Ok(equal),
        "<>" => Ok(!equal),
        other => Err(UnknowableCondition {
            attribute,
            reason: format!("unsupported comparator {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> PlanDescriptor {
        PlanDescriptor {
            program: "EU_BSE".to_string(),
            degree: "BSE".to_string(),
            major: "CSCI".to_string(),
            concentration: Some("AI".to_string()),
            year: 2024,
        }
    }

    fn relational(left: &str, operator: &str, right: &str) -> Condition {
        Condition {
            relational_operator: Some(RelationalOperator {
                left: left.to_string(),
                operator: operator.to_string(),
                right: right.to_string(),
            }),
            ..Condition::default()
        }
    }

    #[test]
    fn major_equality() {
        assert!(evaluate(&relational("MAJOR", "=", "CSCI"), &descriptor()).unwrap());
        assert!(!evaluate(&relational("MAJOR", "=", "MATH"), &descriptor()).unwrap());
    }

    #[test]
    fn inequality_comparator() {
        assert!(evaluate(&relational("MAJOR", "<>", "MATH"), &descriptor()).unwrap());
        assert!(!evaluate(&relational("MAJOR", "<>", "CSCI"), &descriptor()).unwrap());
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(evaluate(&relational("major", "=", "csci"), &descriptor()).unwrap());
    }

    #[test]
    fn missing_concentration_compares_as_empty() {
        let mut desc = descriptor();
        desc.concentration = None;
        assert!(!evaluate(&relational("CONC", "=", "AI"), &desc).unwrap());
        assert!(evaluate(&relational("CONC", "<>", "AI"), &desc).unwrap());
    }

    #[test]
    fn and_or_connectors() {
        let both = Condition {
            connector: Some("AND".to_string()),
            left_condition: Some(Box::new(relational("MAJOR", "=", "CSCI"))),
            right_condition: Some(Box::new(relational("CONC", "=", "AI"))),
            ..Condition::default()
        };
        assert!(evaluate(&both, &descriptor()).unwrap());

        let either = Condition {
            connector: Some("OR".to_string()),
            left_condition: Some(Box::new(relational("MAJOR", "=", "MATH"))),
            right_condition: Some(Box::new(relational("DEGREE", "=", "BSE"))),
            ..Condition::default()
        };
        assert!(evaluate(&either, &descriptor()).unwrap());
    }

    #[test]
    fn grouping_without_connector_passes_through() {
        let wrapped = Condition {
            left_condition: Some(Box::new(relational("PROGRAM", "=", "EU_BSE"))),
            ..Condition::default()
        };
        assert!(evaluate(&wrapped, &descriptor()).unwrap());
    }

    #[test]
    fn unsupported_attribute_is_unknowable() {
        let err = evaluate(&relational("BANNERGPA", "=", "3.0"), &descriptor()).unwrap_err();
        assert_eq!(err.attribute, "BANNERGPA");
    }

    #[test]
    fn unsupported_comparator_is_unknowable() {
        let err = evaluate(&relational("MAJOR", ">=", "CSCI"), &descriptor()).unwrap_err();
        assert!(err.reason.contains(">="));
    }

    #[test]
    fn unknowable_side_poisons_connector() {
        let cond = Condition {
            connector: Some("OR".to_string()),
            left_condition: Some(Box::new(relational("MAJOR", "=", "CSCI"))),
            right_condition: Some(Box::new(relational("GPA", "=", "4.0"))),
            ..Condition::default()
        };
        assert!(evaluate(&cond, &descriptor()).is_err());
    }

    #[test]
    fn empty_condition_is_unknowable() {
        assert!(evaluate(&Condition::default(), &descriptor()).is_err());
    }
}
