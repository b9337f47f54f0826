//! # Requirement Rule Nodes
//!
//! A [`Rule`] is one node in a degree plan's requirement tree: either a
//! course rule (matches courses against a [`CourseQuery`]) or a group rule
//! (counts satisfied child rules). Both kinds share the `num`/`credits`
//! threshold fields but evaluate them over different entities.
//!
//! Rules do not hold child collections. The tree is an arena owned by
//! [`DegreePlan`](crate::plan::DegreePlan); each rule stores only its
//! optional parent id, and children are found by parent-id query.

use serde::{Deserialize, Serialize};

use pdp_core::{CourseQuery, Credits, RuleId};

/// What a rule matches: courses directly, or child rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleBody {
    /// Leaf rule: count/sum the fulfillments whose course matches `query`.
    CourseMatch {
        /// The course-set criterion.
        query: CourseQuery,
    },
    /// Composite rule: count the child rules that are themselves satisfied.
    Group,
}

/// One requirement node in a degree plan's rule tree.
///
/// Thresholds when present must independently hold:
///
/// - course rule: at least `num` distinct matching fulfillments AND at
///   least `credits` summed matching credits;
/// - group rule: at least `num` satisfied children (`None` means all
///   children must be satisfied).
///
/// `num_max`/`credits_max` are advisory range ends recorded by the audit
/// translator. Satisfaction is floor-only; the maxima are never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Opaque identity within the owning plan.
    pub id: RuleId,
    /// Display title (may be empty).
    pub title: String,
    /// Parent rule, or `None` for a top-level rule of the plan.
    pub parent: Option<RuleId>,
    /// Minimum count threshold (matching courses, or satisfied children).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Minimum credit-sum threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    /// Advisory upper count bound (recorded, not enforced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_max: Option<u32>,
    /// Advisory upper credit bound (recorded, not enforced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_max: Option<Credits>,
    /// Leaf or group semantics.
    pub body: RuleBody,
}

impl Rule {
    /// Whether this is a course (leaf) rule.
    pub fn is_course_rule(&self) -> bool {
        matches!(self.body, RuleBody::CourseMatch { .. })
    }

    /// Whether this is a group (composite) rule.
    pub fn is_group(&self) -> bool {
        matches!(self.body, RuleBody::Group)
    }

    /// The course query, if this is a course rule.
    pub fn query(&self) -> Option<&CourseQuery> {
        match &self.body {
            RuleBody::CourseMatch { query } => Some(query),
            RuleBody::Group => None,
        }
    }

    /// Whether the thresholds are met for the given aggregates.
    ///
    /// Each threshold, when present, must hold on its own; an absent
    /// threshold constrains nothing.
    pub(crate) fn thresholds_met(&self, count: u32, credit_total: Credits) -> bool {
        let num_ok = self.num.map_or(true, |n| count >= n);
        let credits_ok = self.credits.map_or(true, |c| credit_total >= c);
        num_ok && credits_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdp_core::CourseCode;

    fn course_rule(num: Option<u32>, credits: Option<Credits>) -> Rule {
        Rule {
            id: RuleId::new(),
            title: String::new(),
            parent: None,
            num,
            credits,
            num_max: None,
            credits_max: None,
            body: RuleBody::CourseMatch {
                query: CourseQuery::FullCode(CourseCode::new("CIS-1200").unwrap()),
            },
        }
    }

    #[test]
    fn kind_accessors() {
        let leaf = course_rule(Some(1), None);
        assert!(leaf.is_course_rule());
        assert!(!leaf.is_group());
        assert!(leaf.query().is_some());

        let group = Rule {
            body: RuleBody::Group,
            ..leaf.clone()
        };
        assert!(group.is_group());
        assert!(group.query().is_none());
    }

    #[test]
    fn both_thresholds_must_hold() {
        let rule = course_rule(Some(2), Some(Credits::from_hundredths(100)));
        assert!(rule.thresholds_met(2, Credits::from_hundredths(100)));
        assert!(!rule.thresholds_met(1, Credits::from_hundredths(200)));
        assert!(!rule.thresholds_met(3, Credits::from_hundredths(50)));
    }

    #[test]
    fn absent_threshold_constrains_nothing() {
        let num_only = course_rule(Some(1), None);
        assert!(num_only.thresholds_met(1, Credits::ZERO));

        let credits_only = course_rule(None, Some(Credits::from_hundredths(50)));
        assert!(credits_only.thresholds_met(0, Credits::from_hundredths(50)));
    }

    #[test]
    fn advisory_maxima_do_not_affect_thresholds() {
        let mut rule = course_rule(Some(1), None);
        rule.num_max = Some(2);
        // Exceeding the advisory maximum still satisfies.
        assert!(rule.thresholds_met(5, Credits::ZERO));
    }

    #[test]
    fn rule_serde_roundtrip() {
        let rule = course_rule(Some(2), Some(Credits::from_hundredths(150)));
        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
