//! # Audit Translation
//!
//! Recursive descent over a typed [`AuditDocument`], producing a validated
//! [`DegreePlan`]. Runs offline at catalog-setup time, once per
//! program/year; nothing here executes during satisfaction evaluation.
//!
//! ## Translation Rules
//!
//! - `Course` → a leaf rule. Thresholds come from `classesBegin`/
//!   `creditsBegin` (range ends are recorded as advisory maxima, never
//!   enforced); the course array folds into a [`CourseQuery`] using each
//!   entry's connector (`AND`/`+` conjoin, anything else disjoins).
//! - `IfStmt` → decided now against the target plan descriptor; only the
//!   chosen branch is translated. Unknowable conditions are logged and the
//!   construct is skipped.
//! - `Group` → a group rule with `num = numberOfGroups` and the
//!   alternatives translated as independent child rules, so each child
//!   remains separately evaluable.
//! - `Subset` → spliced into the surrounding rule list.
//! - Marker types (`Block`, `Blocktype`, `Complete`, `Incomplete`,
//!   `Noncourse`) produce nothing.
//!
//! Each audit block's rules become top-level rules of the plan; blocks
//! themselves are sectioning, not requirements.

use pdp_core::{CourseCode, CourseQuery, Credits, RuleId, Semester};
use pdp_engine::{DegreePlan, PlanDescriptor};

use crate::condition;
use crate::dto::{
    AuditDocument, AuditRule, CourseArrayEntry, CourseRequirement, CourseRuleData, WithFilter,
};
use crate::error::{AuditError, AuditResult};
use crate::schools;

/// Translates audit documents into degree plans for one target descriptor.
///
/// The descriptor is the only context conditions are decided against;
/// constructing a translator is cheap and there is no process-wide state,
/// so translations for different programs can run side by side.
#[derive(Debug, Clone)]
pub struct Translator {
    descriptor: PlanDescriptor,
}

impl Translator {
    /// Create a translator targeting the given plan descriptor.
    pub fn new(descriptor: PlanDescriptor) -> Self {
        Self { descriptor }
    }

    /// The descriptor this translator decides conditions against.
    pub fn descriptor(&self) -> &PlanDescriptor {
        &self.descriptor
    }

    /// Translate a whole audit document into a validated degree plan.
    ///
    /// # Errors
    ///
    /// Returns an [`AuditError`] for constructs the translator refuses to
    /// guess about: missing thresholds, range ends without begins,
    /// unresolvable course entries, unknown school codes, and a final
    /// rule-tree validation failure.
    pub fn translate(&self, document: &AuditDocument) -> AuditResult<DegreePlan> {
        let mut plan = DegreePlan::new(self.descriptor.clone())?;

        for block in &document.block_array {
            if !block.header.qualifier_array.is_empty() {
                tracing::debug!(
                    block = %block.title,
                    qualifiers = block.header.qualifier_array.len(),
                    "ignoring uninterpreted header qualifiers"
                );
            }
            if let Some(value) = &block.requirement_value {
                tracing::debug!(block = %block.title, value = %value, "block requirement value recorded only");
            }
            let added = self.translate_rule_array(&mut plan, None, &block.rule_array)?;
            tracing::info!(block = %block.title, rules = added, "translated audit block");
        }

        plan.validate()?;
        Ok(plan)
    }

    /// Translate one rule array under `parent`, returning how many rule
    /// nodes were added.
    fn translate_rule_array(
        &self,
        plan: &mut DegreePlan,
        parent: Option<RuleId>,
        rules: &[AuditRule],
    ) -> AuditResult<usize> {
        let mut added = 0;
        for rule in rules {
            match rule {
                AuditRule::Course(data) => {
                    added += self.translate_course(plan, parent, data)?;
                }
                AuditRule::IfStmt(data) => {
                    match condition::evaluate(&data.requirement.left_condition, &self.descriptor)
                    {
                        Ok(true) => {
                            if let Some(part) = &data.requirement.if_part {
                                added +=
                                    self.translate_rule_array(plan, parent, &part.rule_array)?;
                            }
                        }
                        Ok(false) => {
                            if let Some(part) = &data.requirement.else_part {
                                added +=
                                    self.translate_rule_array(plan, parent, &part.rule_array)?;
                            }
                        }
                        Err(unknowable) => {
                            tracing::warn!(
                                rule = %data.label,
                                error = %unknowable,
                                "skipping conditional with unknowable condition"
                            );
                        }
                    }
                }
                AuditRule::Group(data) => {
                    let num: u32 = data
                        .requirement
                        .number_of_groups
                        .trim()
                        .parse()
                        .map_err(|_| AuditError::InvalidGroupCount {
                            label: data.label.clone(),
                            value: data.requirement.number_of_groups.clone(),
                        })?;
                    let group = plan.add_group_rule(parent, data.label.clone(), Some(num))?;
                    let children =
                        self.translate_rule_array(plan, Some(group), &data.rule_array)?;
                    if children == 0 {
                        tracing::warn!(
                            rule = %data.label,
                            "dropping group whose alternatives all translated to nothing"
                        );
                        plan.remove_rule(group);
                    } else {
                        added += 1;
                    }
                }
                AuditRule::Subset(data) => match &data.rule_array {
                    Some(rules) => {
                        added += self.translate_rule_array(plan, parent, rules)?;
                    }
                    None => {
                        tracing::warn!(rule = %data.label, "skipping subset without a rule array");
                    }
                },
                AuditRule::Block(_)
                | AuditRule::Blocktype(_)
                | AuditRule::Complete(_)
                | AuditRule::Incomplete(_)
                | AuditRule::Noncourse(_) => {
                    tracing::debug!(rule = %rule.label(), "skipping structural rule");
                }
            }
        }
        Ok(added)
    }

    /// Translate one `Course` rule into a leaf, returning 1 if a rule was
    /// added (0 when the entry list is empty and there is nothing to match).
    fn translate_course(
        &self,
        plan: &mut DegreePlan,
        parent: Option<RuleId>,
        data: &CourseRuleData,
    ) -> AuditResult<usize> {
        let (num, num_max, credits, credits_max) =
            self.thresholds(&data.label, &data.requirement)?;

        let Some(query) = self.course_query(&data.label, &data.requirement.course_array)? else {
            tracing::warn!(rule = %data.label, "skipping course rule with empty course array");
            return Ok(0);
        };

        let id = plan.add_course_rule(parent, data.label.clone(), num, credits, query)?;
        if num_max.is_some() || credits_max.is_some() {
            plan.set_advisory_maxima(id, num_max, credits_max);
        }
        Ok(1)
    }

    /// Parse the four threshold fields, enforcing begin/end pairing.
    #[allow(clippy::type_complexity)]
    fn thresholds(
        &self,
        label: &str,
        req: &CourseRequirement,
    ) -> AuditResult<(Option<u32>, Option<u32>, Option<Credits>, Option<Credits>)> {
        let classes_begin = non_empty(&req.classes_begin);
        let classes_end = non_empty(&req.classes_end);
        let credits_begin = non_empty(&req.credits_begin);
        let credits_end = non_empty(&req.credits_end);

        if classes_end.is_some() && classes_begin.is_none() {
            return Err(AuditError::EndWithoutBegin {
                label: label.to_string(),
                kind: "classes",
            });
        }
        if credits_end.is_some() && credits_begin.is_none() {
            return Err(AuditError::EndWithoutBegin {
                label: label.to_string(),
                kind: "credits",
            });
        }
        if classes_begin.is_none() && credits_begin.is_none() {
            return Err(AuditError::MissingThreshold {
                label: label.to_string(),
            });
        }

        let parse_count = |value: &str, kind: &'static str| -> AuditResult<u32> {
            value.parse().map_err(|_| AuditError::InvalidThreshold {
                label: label.to_string(),
                kind,
                value: value.to_string(),
            })
        };
        let parse_credits = |value: &str, kind: &'static str| -> AuditResult<Credits> {
            Credits::parse(value).map_err(|_| AuditError::InvalidThreshold {
                label: label.to_string(),
                kind,
                value: value.to_string(),
            })
        };

        let num = classes_begin
            .map(|v| parse_count(v, "classesBegin"))
            .transpose()?;
        let num_max = classes_end
            .map(|v| parse_count(v, "classesEnd"))
            .transpose()?;
        let credits = credits_begin
            .map(|v| parse_credits(v, "creditsBegin"))
            .transpose()?;
        let credits_max = credits_end
            .map(|v| parse_credits(v, "creditsEnd"))
            .transpose()?;

        Ok((num, num_max, credits, credits_max))
    }

    /// Fold a course array into one query. Returns `None` for an empty
    /// array.
    fn course_query(
        &self,
        label: &str,
        entries: &[CourseArrayEntry],
    ) -> AuditResult<Option<CourseQuery>> {
        let mut query: Option<CourseQuery> = None;
        for entry in entries {
            let entry_query = self.entry_query(label, entry)?;
            query = Some(match query {
                None => entry_query,
                Some(folded) => {
                    let connector = entry.connector.trim().to_uppercase();
                    if connector == "AND" || connector == "+" {
                        CourseQuery::And(vec![folded, entry_query])
                    } else {
                        CourseQuery::Or(vec![folded, entry_query])
                    }
                }
            });
        }
        Ok(query)
    }

    /// Translate one discipline/number(-range) entry plus its refinements.
    fn entry_query(&self, label: &str, entry: &CourseArrayEntry) -> AuditResult<CourseQuery> {
        let discipline = entry.discipline.trim().to_uppercase();
        let number = entry.number.trim();
        let number_end = entry
            .number_end
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "@");
        let wild_discipline = discipline.is_empty() || discipline == "@";
        let wild_number = number.is_empty() || number == "@";

        let unresolvable = || AuditError::UnresolvableCourseEntry {
            label: label.to_string(),
            discipline: entry.discipline.clone(),
            number: entry.number.clone(),
        };
        let parse_number = |value: &str| value.parse::<u32>().map_err(|_| unresolvable());

        let base = match (wild_discipline, wild_number) {
            // "@ @": any course, subject to the with-filters below.
            (true, true) => CourseQuery::Any,
            // "CIS @": everything in the department.
            (false, true) => CourseQuery::Department(discipline.clone()),
            // "@ 3999" or "@ 1000:1999": number match across departments.
            (true, false) => {
                let begin = parse_number(number)?;
                let end = match number_end {
                    Some(e) => parse_number(e)?,
                    None => begin,
                };
                CourseQuery::CodeRange { begin, end }
            }
            (false, false) => match number_end {
                Some(e) => CourseQuery::And(vec![
                    CourseQuery::Department(discipline.clone()),
                    CourseQuery::CodeRange {
                        begin: parse_number(number)?,
                        end: parse_number(e)?,
                    },
                ]),
                None => match CourseCode::new(format!("{discipline}-{number}")) {
                    Ok(code) => CourseQuery::FullCode(code),
                    Err(_) => return Err(unresolvable()),
                },
            },
        };

        let mut parts = vec![base];
        for filter in &entry.with_array {
            if let Some(refinement) = self.with_filter_query(label, filter)? {
                parts.push(refinement);
            }
        }
        Ok(CourseQuery::and(parts))
    }

    /// Translate one `withArray` refinement. Filters that do not constrain
    /// course matching (residency, grades) return `None`.
    fn with_filter_query(
        &self,
        label: &str,
        filter: &WithFilter,
    ) -> AuditResult<Option<CourseQuery>> {
        let code = filter.code.trim().to_uppercase();
        match code.as_str() {
            "ATTRIBUTE" | "DWATTRIBUTE" => {
                let parts = filter
                    .value_list
                    .iter()
                    .map(|v| CourseQuery::Attribute(v.trim().to_uppercase()))
                    .collect();
                Ok(Some(CourseQuery::or(parts)))
            }
            "TERM" | "DWTERM" => {
                let mut parts = Vec::new();
                for value in &filter.value_list {
                    match Semester::new(value.clone()) {
                        Ok(semester) => parts.push(CourseQuery::InSemester(semester)),
                        Err(e) => tracing::warn!(
                            rule = label,
                            value = %value,
                            error = %e,
                            "skipping unparseable term filter"
                        ),
                    }
                }
                if parts.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(CourseQuery::or(parts)))
                }
            }
            "COLLEGE" | "SCHOOL" | "DWCOLLEGE" | "DWSCHOOL" => {
                let mut departments = Vec::new();
                for value in &filter.value_list {
                    match schools::school_departments(value) {
                        Some(roster) => {
                            departments.extend(roster.iter().map(|d| d.to_string()));
                        }
                        None => {
                            return Err(AuditError::UnknownSchool {
                                code: value.clone(),
                            })
                        }
                    }
                }
                Ok(Some(CourseQuery::DepartmentIn(departments)))
            }
            "DWRESIDENT" | "DWGRADE" | "DWGRADELETTER" | "DWGRADENUMBER" | "DWPASSFAIL" => {
                tracing::debug!(rule = label, filter = %code, "ignoring non-matching course filter");
                Ok(None)
            }
            other => {
                tracing::warn!(rule = label, filter = other, "skipping unsupported course filter");
                Ok(None)
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
