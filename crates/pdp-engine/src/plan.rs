//! # Degree Plans — Versioned Requirement Specifications
//!
//! A [`DegreePlan`] is one versioned requirement specification
//! (program/degree/major/concentration/year). It owns every [`Rule`] node of
//! its requirement forest in an insertion-ordered arena, plus the
//! [`DoubleCountRestriction`]s that cap sharing between rule pairs.
//!
//! ## Arena Invariants
//!
//! Rules reference each other only by [`RuleId`]. A rule with
//! `parent: None` is a top-level rule; children are discovered with
//! [`DegreePlan::children_of`]. Structural invariants (a rule has a course
//! query XOR children, leaf thresholds present, group minimums within child
//! counts, restrictions reference two distinct existing rules) are enforced
//! by the mutation methods where possible and by [`DegreePlan::validate`]
//! for whole-tree properties. Plans are validated at authoring/import time;
//! evaluation assumes a validated plan.

use serde::{Deserialize, Serialize};

use pdp_core::{
    ConfigurationError, CourseQuery, Credits, DegreePlanId, RestrictionId, RuleId,
};

use crate::rule::{Rule, RuleBody};

// ---------------------------------------------------------------------------
// PlanDescriptor
// ---------------------------------------------------------------------------

/// The unique identity of a versioned degree plan.
///
/// (`program`, `degree`, `major`, `concentration`, `year`) together identify
/// one requirement specification; the persistence layer treats the tuple as
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanDescriptor {
    /// Program code (e.g. `"EU_BSE"`).
    pub program: String,
    /// Degree code (e.g. `"BSE"`).
    pub degree: String,
    /// Major code (e.g. `"CSCI"`).
    pub major: String,
    /// Concentration code, if the major has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<String>,
    /// Catalog year the specification was issued for.
    pub year: u16,
}

impl PlanDescriptor {
    /// Validate that the required descriptor fields are non-empty.
    fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("program", &self.program),
            ("degree", &self.degree),
            ("major", &self.major),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigurationError::EmptyDescriptorField { field });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for PlanDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.concentration {
            Some(conc) => write!(
                f,
                "{}/{}/{}/{} ({})",
                self.program, self.degree, self.major, conc, self.year
            ),
            None => write!(
                f,
                "{}/{}/{} ({})",
                self.program, self.degree, self.major, self.year
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// DoubleCountRestriction
// ---------------------------------------------------------------------------

/// A pairwise cap on how much coursework may count toward two rules at once.
///
/// `max_courses` caps the number of fulfillments claimed against both rules
/// simultaneously; `max_credits` caps their summed credits. At least one cap
/// must be set. The caps constrain fulfillment *assignment* — enforcement
/// happens when a write would create the overage, not during evaluation of
/// an already-valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleCountRestriction {
    /// Opaque identity.
    pub id: RestrictionId,
    /// One restricted rule.
    pub rule: RuleId,
    /// The other restricted rule.
    pub other_rule: RuleId,
    /// Maximum fulfillments countable toward both rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_courses: Option<u32>,
    /// Maximum summed credits countable toward both rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<Credits>,
}

// ---------------------------------------------------------------------------
// DegreePlan
// ---------------------------------------------------------------------------

/// A versioned degree requirement specification: descriptor, rule arena,
/// and double-count restrictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreePlan {
    id: DegreePlanId,
    descriptor: PlanDescriptor,
    /// All rule nodes in insertion order. Tens of nodes in practice, so
    /// lookups scan rather than index.
    rules: Vec<Rule>,
    restrictions: Vec<DoubleCountRestriction>,
}

impl DegreePlan {
    /// Create an empty plan for the given descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyDescriptorField`] if a required
    /// descriptor field is blank.
    pub fn new(descriptor: PlanDescriptor) -> Result<Self, ConfigurationError> {
        descriptor.validate()?;
        Ok(Self {
            id: DegreePlanId::new(),
            descriptor,
            rules: Vec::new(),
            restrictions: Vec::new(),
        })
    }

    /// The plan's identity.
    pub fn id(&self) -> DegreePlanId {
        self.id
    }

    /// The plan's descriptor.
    pub fn descriptor(&self) -> &PlanDescriptor {
        &self.descriptor
    }

    /// Add a course (leaf) rule.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::LeafWithoutThreshold`] if both `num` and
    ///   `credits` are `None`.
    /// - [`ConfigurationError::UnknownParent`] /
    ///   [`ConfigurationError::QueryWithChildren`] for a missing or
    ///   non-group parent.
    pub fn add_course_rule(
        &mut self,
        parent: Option<RuleId>,
        title: impl Into<String>,
        num: Option<u32>,
        credits: Option<Credits>,
        query: CourseQuery,
    ) -> Result<RuleId, ConfigurationError> {
        let title = title.into();
        let id = RuleId::new();
        if num.is_none() && credits.is_none() {
            return Err(ConfigurationError::LeafWithoutThreshold { rule: id, title });
        }
        self.check_parent(id, parent)?;
        self.rules.push(Rule {
            id,
            title,
            parent,
            num,
            credits,
            num_max: None,
            credits_max: None,
            body: RuleBody::CourseMatch { query },
        });
        Ok(id)
    }

    /// Add a group (composite) rule. `num = None` requires all children
    /// satisfied; `num = Some(k)` requires at least `k`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for a missing or non-group parent.
    pub fn add_group_rule(
        &mut self,
        parent: Option<RuleId>,
        title: impl Into<String>,
        num: Option<u32>,
    ) -> Result<RuleId, ConfigurationError> {
        let id = RuleId::new();
        self.check_parent(id, parent)?;
        self.rules.push(Rule {
            id,
            title: title.into(),
            parent,
            num,
            credits: None,
            num_max: None,
            credits_max: None,
            body: RuleBody::Group,
        });
        Ok(id)
    }

    /// Record advisory range maxima on an existing rule (audit translation
    /// keeps them for display; satisfaction never enforces them).
    pub fn set_advisory_maxima(
        &mut self,
        rule: RuleId,
        num_max: Option<u32>,
        credits_max: Option<Credits>,
    ) {
        if let Some(r) = self.rules.iter_mut().find(|r| r.id == rule) {
            r.num_max = num_max;
            r.credits_max = credits_max;
        }
    }

    /// Add a double-count restriction between two rules of this plan.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::RestrictionUnknownRule`] if either rule is
    ///   not in the plan.
    /// - [`ConfigurationError::RestrictionSelfReference`] if both sides are
    ///   the same rule.
    /// - [`ConfigurationError::RestrictionWithoutCap`] if neither cap is set.
    pub fn add_restriction(
        &mut self,
        rule: RuleId,
        other_rule: RuleId,
        max_courses: Option<u32>,
        max_credits: Option<Credits>,
    ) -> Result<RestrictionId, ConfigurationError> {
        if rule == other_rule {
            return Err(ConfigurationError::RestrictionSelfReference { rule });
        }
        for r in [rule, other_rule] {
            if self.rule(r).is_none() {
                return Err(ConfigurationError::RestrictionUnknownRule { rule: r });
            }
        }
        if max_courses.is_none() && max_credits.is_none() {
            return Err(ConfigurationError::RestrictionWithoutCap { rule, other_rule });
        }
        let id = RestrictionId::new();
        self.restrictions.push(DoubleCountRestriction {
            id,
            rule,
            other_rule,
            max_courses,
            max_credits,
        });
        Ok(id)
    }

    /// Remove a childless rule that no restriction references.
    ///
    /// Authoring tools use this to drop constructs that translated to
    /// nothing (e.g. a group whose branches were all skipped). Returns
    /// `false` — leaving the plan unchanged — if the rule has children, is
    /// referenced by a restriction, or does not exist.
    pub fn remove_rule(&mut self, id: RuleId) -> bool {
        let has_children = self.rules.iter().any(|r| r.parent == Some(id));
        let referenced = self
            .restrictions
            .iter()
            .any(|r| r.rule == id || r.other_rule == id);
        if has_children || referenced {
            return false;
        }
        match self.rules.iter().position(|r| r.id == id) {
            Some(position) => {
                self.rules.remove(position);
                true
            }
            None => false,
        }
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// All rules, in insertion order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The number of rule nodes in the plan.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Children of a rule, by parent-id query, in insertion order.
    pub fn children_of(&self, id: RuleId) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.parent == Some(id))
    }

    /// Top-level rules (those belonging directly to the plan).
    pub fn top_level_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.parent.is_none())
    }

    /// The plan's double-count restrictions.
    pub fn restrictions(&self) -> &[DoubleCountRestriction] {
        &self.restrictions
    }

    /// Validate the whole-tree invariants.
    ///
    /// Run at authoring/import time (and again after deserializing a plan
    /// from storage, since serde bypasses the mutation methods). Checks:
    ///
    /// - every parent reference resolves to a group rule in the plan;
    /// - course rules have no children and at least one threshold;
    /// - group rules have children, and `num` does not exceed the child
    ///   count (an empty group with `num = Some(0)` is allowed and is
    ///   trivially satisfied);
    /// - restrictions reference two distinct existing rules and cap
    ///   something.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.descriptor.validate()?;

        for rule in &self.rules {
            if let Some(parent) = rule.parent {
                match self.rule(parent) {
                    None => {
                        return Err(ConfigurationError::UnknownParent {
                            rule: rule.id,
                            parent,
                        })
                    }
                    Some(p) if p.is_course_rule() => {
                        return Err(ConfigurationError::QueryWithChildren {
                            rule: p.id,
                            title: p.title.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }

            let child_count = self.children_of(rule.id).count();
            match &rule.body {
                RuleBody::CourseMatch { .. } => {
                    if rule.num.is_none() && rule.credits.is_none() {
                        return Err(ConfigurationError::LeafWithoutThreshold {
                            rule: rule.id,
                            title: rule.title.clone(),
                        });
                    }
                }
                RuleBody::Group => {
                    if child_count == 0 && rule.num != Some(0) {
                        return Err(ConfigurationError::EmptyRule {
                            rule: rule.id,
                            title: rule.title.clone(),
                        });
                    }
                    if let Some(num) = rule.num {
                        if num as usize > child_count {
                            return Err(ConfigurationError::GroupMinimumExceedsChildren {
                                rule: rule.id,
                                title: rule.title.clone(),
                                num,
                                children: child_count,
                            });
                        }
                    }
                }
            }
        }

        for restriction in &self.restrictions {
            if restriction.rule == restriction.other_rule {
                return Err(ConfigurationError::RestrictionSelfReference {
                    rule: restriction.rule,
                });
            }
            for r in [restriction.rule, restriction.other_rule] {
                if self.rule(r).is_none() {
                    return Err(ConfigurationError::RestrictionUnknownRule { rule: r });
                }
            }
            if restriction.max_courses.is_none() && restriction.max_credits.is_none() {
                return Err(ConfigurationError::RestrictionWithoutCap {
                    rule: restriction.rule,
                    other_rule: restriction.other_rule,
                });
            }
        }

        Ok(())
    }

    fn check_parent(
        &self,
        child: RuleId,
        parent: Option<RuleId>,
    ) -> Result<(), ConfigurationError> {
        let Some(parent) = parent else {
            return Ok(());
        };
        match self.rule(parent) {
            None => Err(ConfigurationError::UnknownParent {
                rule: child,
                parent,
            }),
            Some(p) if p.is_course_rule() => Err(ConfigurationError::QueryWithChildren {
                rule: p.id,
                title: p.title.clone(),
            }),
            Some(_) => Ok(()),
        }
    }
}
