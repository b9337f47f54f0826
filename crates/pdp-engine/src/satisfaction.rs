//! # Satisfaction Evaluation
//!
//! Whole-plan, restriction-aware satisfaction: given a validated
//! [`DegreePlan`] and a student's [`UserDegreePlan`], produce a
//! [`SatisfactionStatus`] for every rule in the plan.
//!
//! Evaluation is a pure, synchronous tree traversal. Double-count
//! restrictions are checked first — a report is never produced from an
//! over-cap fulfillment state, because such a state is rejected at write
//! time and can only be reached by deserializing externally tampered data.
//!
//! ## Counting Semantics
//!
//! A course rule counts *distinct* fulfillments: two claims of the same
//! (course, semester) pair collapse to one even if a hand-built fulfillment
//! set contains duplicate records. Group rules count satisfied children;
//! their course/credit aggregates are the distinct matched fulfillments
//! across all descendant course rules, reported for display only.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pdp_core::{ConfigurationError, Credits, DegreePlanId, PdpError, RuleId, UserDegreePlanId};

use crate::fulfillment::{check_restrictions, Fulfillment, UserDegreePlan};
use crate::plan::DegreePlan;
use crate::rule::{Rule, RuleBody};

/// The (full code, semester) key identifying a distinct fulfillment.
type FulfillmentKey = (String, Option<String>);

// ---------------------------------------------------------------------------
// SatisfactionStatus
// ---------------------------------------------------------------------------

/// The evaluation outcome for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionStatus {
    /// The evaluated rule.
    pub rule_id: RuleId,
    /// The plan the rule belongs to.
    pub degree_plan_id: DegreePlanId,
    /// Whether the rule's requirement is met.
    pub satisfied: bool,
    /// Distinct matching fulfillments (for groups: across all descendant
    /// course rules).
    pub course_count: u32,
    /// Summed credits of the distinct matching fulfillments.
    pub credit_total: Credits,
}

// ---------------------------------------------------------------------------
// SatisfactionReport
// ---------------------------------------------------------------------------

/// Per-rule satisfaction for an entire degree plan.
///
/// The statuses themselves are a pure function of (plan, fulfillment set);
/// `evaluated_at` records when this report was produced and is the only
/// field that varies between identical evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfactionReport {
    degree_plan: DegreePlanId,
    user_plan: UserDegreePlanId,
    evaluated_at: DateTime<Utc>,
    statuses: BTreeMap<RuleId, SatisfactionStatus>,
    complete: bool,
}

impl SatisfactionReport {
    /// The plan that was evaluated.
    pub fn degree_plan(&self) -> DegreePlanId {
        self.degree_plan
    }

    /// The user plan that was evaluated.
    pub fn user_plan(&self) -> UserDegreePlanId {
        self.user_plan
    }

    /// When this report was produced.
    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// The status for one rule, if it exists in the plan.
    pub fn status(&self, rule: RuleId) -> Option<&SatisfactionStatus> {
        self.statuses.get(&rule)
    }

    /// Whether a rule is satisfied (`false` for unknown rules).
    pub fn is_satisfied(&self, rule: RuleId) -> bool {
        self.statuses.get(&rule).is_some_and(|s| s.satisfied)
    }

    /// All per-rule statuses, keyed by rule id.
    pub fn statuses(&self) -> &BTreeMap<RuleId, SatisfactionStatus> {
        &self.statuses
    }

    /// Whether every top-level rule of the plan is satisfied.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rules that are not yet satisfied, in id order.
    pub fn unsatisfied_rules(&self) -> Vec<RuleId> {
        self.statuses
            .values()
            .filter(|s| !s.satisfied)
            .map(|s| s.rule_id)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SatisfactionEvaluator
// ---------------------------------------------------------------------------

/// Evaluates a fulfillment set against a degree plan's rule tree.
///
/// Holds only a borrow of the plan; construction is free and evaluators may
/// be used concurrently for different user plans without coordination.
#[derive(Debug, Clone, Copy)]
pub struct SatisfactionEvaluator<'a> {
    plan: &'a DegreePlan,
}

impl<'a> SatisfactionEvaluator<'a> {
    /// Create an evaluator for a plan.
    pub fn new(plan: &'a DegreePlan) -> Self {
        Self { plan }
    }

    /// Evaluate every rule of the plan against the user's fulfillments.
    ///
    /// # Errors
    ///
    /// - [`PdpError::RuleViolation`] if the fulfillment set already exceeds
    ///   a double-count cap (possible only for sets that bypassed the
    ///   write-time checks).
    /// - [`PdpError::Configuration`] if a course rule carries no threshold
    ///   (a plan that skipped [`DegreePlan::validate`]).
    pub fn evaluate(&self, user_plan: &UserDegreePlan) -> Result<SatisfactionReport, PdpError> {
        check_restrictions(self.plan, user_plan.fulfillments())?;

        let mut statuses = BTreeMap::new();
        let mut complete = true;
        for rule in self.plan.top_level_rules() {
            let (satisfied, _) =
                self.evaluate_rule(rule, user_plan.fulfillments(), &mut statuses)?;
            complete &= satisfied;
        }

        tracing::debug!(
            degree_plan = %self.plan.id(),
            user_plan = %user_plan.id(),
            rules = statuses.len(),
            complete,
            "evaluated degree plan satisfaction"
        );

        Ok(SatisfactionReport {
            degree_plan: self.plan.id(),
            user_plan: user_plan.id(),
            evaluated_at: Utc::now(),
            statuses,
            complete,
        })
    }

    /// Evaluate one rule (recursively for groups), record its status, and
    /// return its satisfaction plus the distinct fulfillments it matched
    /// (keyed by course/semester, with credits for aggregation).
    fn evaluate_rule(
        &self,
        rule: &Rule,
        fulfillments: &[Fulfillment],
        statuses: &mut BTreeMap<RuleId, SatisfactionStatus>,
    ) -> Result<(bool, BTreeMap<FulfillmentKey, Credits>), ConfigurationError> {
        let (satisfied, matched) = match &rule.body {
            RuleBody::CourseMatch { query } => {
                if rule.num.is_none() && rule.credits.is_none() {
                    return Err(ConfigurationError::LeafWithoutThreshold {
                        rule: rule.id,
                        title: rule.title.clone(),
                    });
                }
                let mut matched: BTreeMap<FulfillmentKey, Credits> = BTreeMap::new();
                for f in fulfillments {
                    if f.rules.contains(&rule.id) && query.matches(&f.course) {
                        matched.insert(f.key(), f.course.effective_credits());
                    }
                }
                let count = matched.len() as u32;
                let total: Credits = matched.values().copied().sum();
                (rule.thresholds_met(count, total), matched)
            }
            RuleBody::Group => {
                let children: Vec<&Rule> = self.plan.children_of(rule.id).collect();
                let mut satisfied_children = 0u32;
                let mut matched: BTreeMap<FulfillmentKey, Credits> = BTreeMap::new();
                for child in &children {
                    let (child_satisfied, child_matched) =
                        self.evaluate_rule(child, fulfillments, statuses)?;
                    if child_satisfied {
                        satisfied_children += 1;
                    }
                    matched.extend(child_matched);
                }
                // Groups count satisfied children; a group with no minimum
                // requires all of them.
                let satisfied = match rule.num {
                    Some(num) => satisfied_children >= num,
                    None => satisfied_children as usize == children.len(),
                };
                (satisfied, matched)
            }
        };

        let count = matched.len() as u32;
        let credit_total: Credits = matched.values().copied().sum();
        statuses.insert(
            rule.id,
            SatisfactionStatus {
                rule_id: rule.id,
                degree_plan_id: self.plan.id(),
                satisfied,
                course_count: count,
                credit_total,
            },
        );
        Ok((satisfied, matched))
    }
}


#[cfg(test)]
mod properties {
    //! Property tests for the threshold semantics of §4.1-style rules:
    //! satisfaction is monotone in the fulfillment set, and group
    //! satisfaction agrees with independent child evaluation.

    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use pdp_core::{CourseCode, CourseQuery, CourseRecord, Credits, RuleId};

    use crate::plan::{DegreePlan, PlanDescriptor};
    use crate::satisfaction::SatisfactionEvaluator;
    use crate::UserDegreePlan;

    fn descriptor() -> PlanDescriptor {
        PlanDescriptor {
            program: "EU_BSE".to_string(),
            degree: "BSE".to_string(),
            major: "CSCI".to_string(),
            concentration: None,
            year: 2024,
        }
    }

    fn cis_record(number: u32) -> CourseRecord {
        CourseRecord {
            full_code: CourseCode::new(format!("CIS-{number:04}")).unwrap(),
            credits: Some(Credits::from_hundredths(100)),
            semester: None,
            attributes: Vec::new(),
        }
    }

    proptest! {
        /// Adding a satisfying course never flips a satisfied leaf back to
        /// unsatisfied.
        #[test]
        fn leaf_satisfaction_is_monotone(initial in 0u32..6, num in 0u32..6) {
            let mut plan = DegreePlan::new(descriptor()).unwrap();
            let rule = plan
                .add_course_rule(
                    None,
                    "CIS courses",
                    Some(num),
                    None,
                    CourseQuery::Department("CIS".to_string()),
                )
                .unwrap();

            let mut user = UserDegreePlan::new(&plan);
            for i in 0..initial {
                user.assign(
                    &plan,
                    cis_record(1000 + i),
                    [rule].into_iter().collect::<BTreeSet<RuleId>>(),
                )
                .unwrap();
            }

            let evaluator = SatisfactionEvaluator::new(&plan);
            let before = evaluator.evaluate(&user).unwrap().is_satisfied(rule);

            user.assign(
                &plan,
                cis_record(9000),
                [rule].into_iter().collect::<BTreeSet<RuleId>>(),
            )
            .unwrap();
            let after = evaluator.evaluate(&user).unwrap().is_satisfied(rule);

            prop_assert!(!before || after, "satisfied leaf became unsatisfied");
            prop_assert_eq!(after, initial + 1 >= num);
        }

        /// A pick-at-least-k group is satisfied iff at least k children are
        /// independently satisfied.
        #[test]
        fn group_agrees_with_independent_child_evaluation(
            children in 1usize..5,
            k_seed in 0u32..8,
            present_mask in 0u32..32,
        ) {
            let k = k_seed % (children as u32 + 1);

            let mut plan = DegreePlan::new(descriptor()).unwrap();
            let group = plan.add_group_rule(None, "Pick k", Some(k)).unwrap();
            let mut child_ids = Vec::new();
            for i in 0..children {
                let id = plan
                    .add_course_rule(
                        Some(group),
                        format!("Option {i}"),
                        Some(1),
                        None,
                        CourseQuery::FullCode(
                            CourseCode::new(format!("CIS-{:04}", 1000 + i)).unwrap(),
                        ),
                    )
                    .unwrap();
                child_ids.push(id);
            }
            plan.validate().unwrap();

            let mut user = UserDegreePlan::new(&plan);
            for (i, &child) in child_ids.iter().enumerate() {
                if present_mask & (1 << i) != 0 {
                    user.assign(
                        &plan,
                        cis_record(1000 + i as u32),
                        [child].into_iter().collect::<BTreeSet<RuleId>>(),
                    )
                    .unwrap();
                }
            }

            let report = SatisfactionEvaluator::new(&plan).evaluate(&user).unwrap();
            let satisfied_children = child_ids
                .iter()
                .filter(|&&c| report.is_satisfied(c))
                .count() as u32;

            prop_assert_eq!(report.is_satisfied(group), satisfied_children >= k);
        }
    }
}
