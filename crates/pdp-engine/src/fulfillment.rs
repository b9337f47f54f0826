//! # Fulfillments — A Student's Claimed Courses
//!
//! A [`Fulfillment`] records that one (course, semester) pair is claimed
//! toward one or more course rules of a degree plan. A course may satisfy
//! several rules at once — the many-to-many claim set is what makes the
//! evaluator restriction-aware — but only up to each
//! [`DoubleCountRestriction`](crate::plan::DoubleCountRestriction)'s cap.
//!
//! ## Write-Time Enforcement
//!
//! Double-count caps are enforced when a fulfillment is written, not when
//! satisfaction is read: [`UserDegreePlan::assign`] and
//! [`UserDegreePlan::reassign`] validate the candidate state first and
//! commit only on success, so a rejected write leaves the prior fulfillment
//! set untouched. Whether a claimed course actually *matches* a rule's query
//! is deliberately not checked here — that is a read-time question answered
//! by the evaluator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pdp_core::{CourseRecord, Credits, FulfillmentId, RuleViolation, UserDegreePlanId};

use crate::plan::DegreePlan;

// ---------------------------------------------------------------------------
// Fulfillment
// ---------------------------------------------------------------------------

/// One claimed (course, semester) pair and the rules it is claimed against.
///
/// The course record's `semester` is the term the student took (or plans to
/// take) the course; `None` means planned with no term chosen yet. The pair
/// (full code, semester) is unique within a [`UserDegreePlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fulfillment {
    /// Opaque identity.
    pub id: FulfillmentId,
    /// The resolved course record, including the claimed term.
    pub course: CourseRecord,
    /// The course rules this fulfillment is claimed against.
    pub rules: BTreeSet<pdp_core::RuleId>,
}

impl Fulfillment {
    /// The uniqueness key within a user plan: full code plus claimed term.
    pub(crate) fn key(&self) -> (String, Option<String>) {
        (
            self.course.full_code.as_str().to_string(),
            self.course.semester.as_ref().map(|s| s.as_str().to_string()),
        )
    }
}

// ---------------------------------------------------------------------------
// Restriction checking
// ---------------------------------------------------------------------------

/// Check a fulfillment set against every double-count restriction of a plan.
///
/// For each restriction, the shared set is the fulfillments claimed against
/// *both* of its rules. A course cap is violated when the shared set's size
/// exceeds `max_courses`; a credit cap when the shared credits exceed
/// `max_credits`. The first violated restriction is reported with the
/// offending course codes.
///
/// Used by [`UserDegreePlan`] mutations before committing a write, and by
/// the evaluator to refuse producing a report from an over-cap state.
pub fn check_restrictions(
    plan: &DegreePlan,
    fulfillments: &[Fulfillment],
) -> Result<(), RuleViolation> {
    for restriction in plan.restrictions() {
        let shared: Vec<&Fulfillment> = fulfillments
            .iter()
            .filter(|f| {
                f.rules.contains(&restriction.rule) && f.rules.contains(&restriction.other_rule)
            })
            .collect();
        if shared.is_empty() {
            continue;
        }

        let courses: Vec<String> = shared
            .iter()
            .map(|f| f.course.full_code.as_str().to_string())
            .collect();

        if let Some(max_courses) = restriction.max_courses {
            let count = shared.len() as u32;
            if count > max_courses {
                return Err(RuleViolation::MaxCoursesExceeded {
                    rule: restriction.rule,
                    other_rule: restriction.other_rule,
                    max_courses,
                    shared: count,
                    courses,
                });
            }
        }

        if let Some(max_credits) = restriction.max_credits {
            let total: Credits = shared.iter().map(|f| f.course.effective_credits()).sum();
            if total > max_credits {
                return Err(RuleViolation::MaxCreditsExceeded {
                    rule: restriction.rule,
                    other_rule: restriction.other_rule,
                    max_credits,
                    shared: total,
                    courses,
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// UserDegreePlan
// ---------------------------------------------------------------------------

/// One student's personal instance of following a [`DegreePlan`]:
/// the fulfillment set they have assembled so far.
///
/// All mutation methods take the governing plan and validate the candidate
/// state before committing; a `RuleViolation` means nothing changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDegreePlan {
    id: UserDegreePlanId,
    degree_plan: pdp_core::DegreePlanId,
    fulfillments: Vec<Fulfillment>,
}

impl UserDegreePlan {
    /// Create an empty user plan following the given degree plan.
    pub fn new(plan: &DegreePlan) -> Self {
        Self {
            id: UserDegreePlanId::new(),
            degree_plan: plan.id(),
            fulfillments: Vec::new(),
        }
    }

    /// The user plan's identity.
    pub fn id(&self) -> UserDegreePlanId {
        self.id
    }

    /// The degree plan this instance follows.
    pub fn degree_plan(&self) -> pdp_core::DegreePlanId {
        self.degree_plan
    }

    /// The current fulfillment set.
    pub fn fulfillments(&self) -> &[Fulfillment] {
        &self.fulfillments
    }

    /// Look up a fulfillment by id.
    pub fn fulfillment(&self, id: FulfillmentId) -> Option<&Fulfillment> {
        self.fulfillments.iter().find(|f| f.id == id)
    }

    /// Claim a course toward a set of rules.
    ///
    /// Validates (in order): every claimed rule exists and is a course rule,
    /// the (course, semester) pair is not already claimed, and no
    /// double-count restriction would be exceeded. On success the
    /// fulfillment is committed and its id returned.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`]; the prior fulfillment set is preserved
    /// exactly.
    pub fn assign(
        &mut self,
        plan: &DegreePlan,
        course: CourseRecord,
        rules: BTreeSet<pdp_core::RuleId>,
    ) -> Result<FulfillmentId, RuleViolation> {
        let candidate = Fulfillment {
            id: FulfillmentId::new(),
            course,
            rules,
        };

        self.check_claimed_rules(plan, &candidate.rules)?;

        let key = candidate.key();
        if let Some(existing) = self.fulfillments.iter().find(|f| f.key() == key) {
            return Err(RuleViolation::DuplicateFulfillment {
                full_code: existing.course.full_code.as_str().to_string(),
                semester: existing
                    .course
                    .semester
                    .as_ref()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| "planned".to_string()),
            });
        }

        let id = candidate.id;
        // Validate against the candidate state, then commit.
        let mut candidate_set = self.fulfillments.clone();
        candidate_set.push(candidate);
        check_restrictions(plan, &candidate_set)?;

        self.fulfillments = candidate_set;
        Ok(id)
    }

    /// Replace the rule claims of an existing fulfillment.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation`]; on error the fulfillment keeps its
    /// previous claims.
    pub fn reassign(
        &mut self,
        plan: &DegreePlan,
        id: FulfillmentId,
        rules: BTreeSet<pdp_core::RuleId>,
    ) -> Result<(), RuleViolation> {
        let position = self
            .fulfillments
            .iter()
            .position(|f| f.id == id)
            .ok_or(RuleViolation::UnknownFulfillment { fulfillment: id })?;

        self.check_claimed_rules(plan, &rules)?;

        let mut candidate_set = self.fulfillments.clone();
        candidate_set[position].rules = rules;
        check_restrictions(plan, &candidate_set)?;

        self.fulfillments = candidate_set;
        Ok(())
    }

    /// Withdraw a fulfillment entirely. Removing a claim can never create a
    /// double-count overage, so this always succeeds for a known id.
    pub fn withdraw(&mut self, id: FulfillmentId) -> Option<Fulfillment> {
        let position = self.fulfillments.iter().position(|f| f.id == id)?;
        Some(self.fulfillments.remove(position))
    }

    fn check_claimed_rules(
        &self,
        plan: &DegreePlan,
        rules: &BTreeSet<pdp_core::RuleId>,
    ) -> Result<(), RuleViolation> {
        for &rule_id in rules {
            match plan.rule(rule_id) {
                None => return Err(RuleViolation::UnknownRule { rule: rule_id }),
                Some(rule) if rule.is_group() => {
                    return Err(RuleViolation::GroupRuleClaim { rule: rule_id })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdp_core::{CourseCode, CourseQuery, RuleId, Semester};

    use crate::plan::PlanDescriptor;

    fn record(code: &str, credits_hundredths: u32, semester: Option<&str>) -> CourseRecord {
        CourseRecord {
            full_code: CourseCode::new(code).unwrap(),
            credits: Some(Credits::from_hundredths(credits_hundredths)),
            semester: semester.map(|s| Semester::new(s).unwrap()),
            attributes: Vec::new(),
        }
    }

    fn plan_with_two_rules() -> (DegreePlan, RuleId, RuleId) {
        let mut plan = DegreePlan::new(PlanDescriptor {
            program: "EU_BSE".to_string(),
            degree: "BSE".to_string(),
            major: "CSCI".to_string(),
            concentration: None,
            year: 2024,
        })
        .unwrap();
        let a = plan
            .add_course_rule(
                None,
                "Core",
                Some(1),
                None,
                CourseQuery::Department("CIS".to_string()),
            )
            .unwrap();
        let b = plan
            .add_course_rule(
                None,
                "Electives",
                Some(2),
                None,
                CourseQuery::Department("CIS".to_string()),
            )
            .unwrap();
        (plan, a, b)
    }

    fn claims(rules: &[RuleId]) -> BTreeSet<RuleId> {
        rules.iter().copied().collect()
    }

    #[test]
    fn assign_and_withdraw() {
        let (plan, a, _) = plan_with_two_rules();
        let mut user = UserDegreePlan::new(&plan);

        let id = user
            .assign(&plan, record("CIS-1200", 100, Some("2024C")), claims(&[a]))
            .unwrap();
        assert_eq!(user.fulfillments().len(), 1);
        assert!(user.fulfillment(id).is_some());

        let removed = user.withdraw(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(user.fulfillments().is_empty());
    }

    #[test]
    fn assign_rejects_unknown_rule() {
        let (plan, _, _) = plan_with_two_rules();
        let mut user = UserDegreePlan::new(&plan);
        let err = user
            .assign(
                &plan,
                record("CIS-1200", 100, None),
                claims(&[RuleId::new()]),
            )
            .unwrap_err();
        assert!(matches!(err, RuleViolation::UnknownRule { .. }));
        assert!(user.fulfillments().is_empty());
    }

    #[test]
    fn assign_rejects_group_rule_claim() {
        let (mut plan, a, _) = plan_with_two_rules();
        let group = plan.add_group_rule(None, "Group", Some(0)).unwrap();
        let mut user = UserDegreePlan::new(&plan);
        let err = user
            .assign(&plan, record("CIS-1200", 100, None), claims(&[a, group]))
            .unwrap_err();
        assert!(matches!(err, RuleViolation::GroupRuleClaim { .. }));
    }

    #[test]
    fn duplicate_course_semester_rejected() {
        let (plan, a, b) = plan_with_two_rules();
        let mut user = UserDegreePlan::new(&plan);
        user.assign(&plan, record("CIS-1200", 100, Some("2024C")), claims(&[a]))
            .unwrap();

        // Same code and term, even against a different rule: rejected.
        let err = user
            .assign(&plan, record("CIS-1200", 100, Some("2024C")), claims(&[b]))
            .unwrap_err();
        assert!(matches!(err, RuleViolation::DuplicateFulfillment { .. }));

        // A different term is a genuinely distinct fulfillment.
        assert!(user
            .assign(&plan, record("CIS-1200", 100, Some("2025A")), claims(&[b]))
            .is_ok());
    }

    #[test]
    fn course_cap_enforced_atomically() {
        let (mut plan, a, b) = plan_with_two_rules();
        plan.add_restriction(a, b, Some(1), None).unwrap();
        let mut user = UserDegreePlan::new(&plan);

        // One shared course is within the cap.
        user.assign(&plan, record("CIS-1200", 100, None), claims(&[a, b]))
            .unwrap();

        // A second shared course exceeds max_courses = 1.
        let err = user
            .assign(&plan, record("CIS-1600", 100, None), claims(&[a, b]))
            .unwrap_err();
        match err {
            RuleViolation::MaxCoursesExceeded {
                max_courses,
                shared,
                courses,
                ..
            } => {
                assert_eq!(max_courses, 1);
                assert_eq!(shared, 2);
                assert!(courses.contains(&"CIS-1200".to_string()));
                assert!(courses.contains(&"CIS-1600".to_string()));
            }
            other => panic!("expected MaxCoursesExceeded, got {other:?}"),
        }
        // Prior state preserved.
        assert_eq!(user.fulfillments().len(), 1);

        // The same course claimed to only one rule is fine.
        assert!(user
            .assign(&plan, record("CIS-1600", 100, None), claims(&[b]))
            .is_ok());
    }

    #[test]
    fn credit_cap_enforced() {
        let (mut plan, a, b) = plan_with_two_rules();
        plan.add_restriction(a, b, None, Some(Credits::from_hundredths(100)))
            .unwrap();
        let mut user = UserDegreePlan::new(&plan);

        user.assign(&plan, record("CIS-1200", 100, None), claims(&[a, b]))
            .unwrap();
        let err = user
            .assign(&plan, record("CIS-1910", 50, None), claims(&[a, b]))
            .unwrap_err();
        assert!(matches!(err, RuleViolation::MaxCreditsExceeded { .. }));
    }

    #[test]
    fn zero_cap_allows_disjoint_claims() {
        let (mut plan, a, b) = plan_with_two_rules();
        plan.add_restriction(a, b, None, Some(Credits::ZERO)).unwrap();
        let mut user = UserDegreePlan::new(&plan);

        // Claimed to only one rule each: no shared fulfillments, no violation.
        user.assign(&plan, record("CIS-1200", 100, None), claims(&[a]))
            .unwrap();
        user.assign(&plan, record("CIS-1910", 50, None), claims(&[b]))
            .unwrap();
        assert_eq!(user.fulfillments().len(), 2);
    }

    #[test]
    fn zero_credit_shared_course_passes_zero_credit_cap() {
        let (mut plan, a, b) = plan_with_two_rules();
        plan.add_restriction(a, b, None, Some(Credits::ZERO)).unwrap();
        let mut user = UserDegreePlan::new(&plan);

        // A zero-credit course shared across both rules sums to zero credits,
        // which does not exceed the zero cap.
        user.assign(&plan, record("CIS-1910", 0, None), claims(&[a, b]))
            .unwrap();
        assert_eq!(user.fulfillments().len(), 1);
    }

    #[test]
    fn reassign_is_atomic() {
        let (mut plan, a, b) = plan_with_two_rules();
        plan.add_restriction(a, b, Some(0), None).unwrap();
        let mut user = UserDegreePlan::new(&plan);

        let id = user
            .assign(&plan, record("CIS-1200", 100, None), claims(&[a]))
            .unwrap();

        // Expanding the claim to both rules would share one course against
        // a zero cap.
        let err = user.reassign(&plan, id, claims(&[a, b])).unwrap_err();
        assert!(matches!(err, RuleViolation::MaxCoursesExceeded { .. }));
        assert_eq!(user.fulfillment(id).unwrap().rules, claims(&[a]));

        // Moving the claim entirely to the other rule is fine.
        user.reassign(&plan, id, claims(&[b])).unwrap();
        assert_eq!(user.fulfillment(id).unwrap().rules, claims(&[b]));
    }

    #[test]
    fn reassign_unknown_fulfillment() {
        let (plan, a, _) = plan_with_two_rules();
        let mut user = UserDegreePlan::new(&plan);
        let err = user
            .reassign(&plan, FulfillmentId::new(), claims(&[a]))
            .unwrap_err();
        assert!(matches!(err, RuleViolation::UnknownFulfillment { .. }));
    }
}
