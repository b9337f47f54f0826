//! # Typed DegreeWorks Document Model
//!
//! Strongly-typed decoding of the third-party audit JSON. The rule grammar
//! is a closed sum type: [`AuditRule`] is internally tagged on `ruleType`,
//! so every construct the translator handles is a variant, exhaustiveness
//! is compiler-checked in the translator's `match`, and an audit export
//! containing an unknown rule type fails at decode time with an error that
//! names the tag — it never reaches translation half-interpreted.
//!
//! Numeric fields arrive as strings in DegreeWorks exports
//! (`"classesBegin": "2"`); they are kept as strings here and parsed during
//! translation, where the surrounding rule label is available for error
//! context.

use serde::Deserialize;

/// A complete audit document: the top-level block array.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditDocument {
    /// Requirement blocks, one per degree/major/concentration section.
    #[serde(rename = "blockArray", default)]
    pub block_array: Vec<AuditBlock>,
}

/// One requirement block of the audit.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditBlock {
    /// Block display title (e.g. `"Major in Computer Science"`).
    #[serde(default)]
    pub title: String,
    /// Raw requirement value string, when the block carries one. Recorded
    /// for diagnostics; block-level totals are expressed by the rules below.
    #[serde(rename = "requirementValue", default)]
    pub requirement_value: Option<String>,
    /// Block header; carries qualifiers the translator does not interpret.
    #[serde(default)]
    pub header: BlockHeader,
    /// The block's requirement rules.
    #[serde(rename = "ruleArray", default)]
    pub rule_array: Vec<AuditRule>,
}

/// Block header metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockHeader {
    /// Header qualifiers (GPA minima and similar). Not interpreted by the
    /// translator; logged and skipped.
    #[serde(rename = "qualifierArray", default)]
    pub qualifier_array: Vec<serde_json::Value>,
}

/// One rule construct, tagged by `ruleType`.
///
/// `Block`, `Blocktype`, `Complete`, `Incomplete`, and `Noncourse` are
/// structural/presentational markers that produce no rule node.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "ruleType")]
pub enum AuditRule {
    /// A course-matching requirement.
    Course(CourseRuleData),
    /// A translation-time conditional.
    IfStmt(IfStmtData),
    /// A pick-N-of-M grouping.
    Group(GroupData),
    /// A flattened sub-list of rules.
    Subset(SubsetData),
    /// Nested-requirement marker; no rule node.
    Block(MarkerData),
    /// Block-type marker; no rule node.
    Blocktype(MarkerData),
    /// Completion marker; no rule node.
    Complete(MarkerData),
    /// Incompletion marker; no rule node.
    Incomplete(MarkerData),
    /// Non-course requirement marker; no rule node.
    Noncourse(MarkerData),
}

impl AuditRule {
    /// The rule's display label, for logging.
    pub fn label(&self) -> &str {
        match self {
            Self::Course(d) => &d.label,
            Self::IfStmt(d) => &d.label,
            Self::Group(d) => &d.label,
            Self::Subset(d) => &d.label,
            Self::Block(d) | Self::Blocktype(d) | Self::Complete(d) | Self::Incomplete(d)
            | Self::Noncourse(d) => &d.label,
        }
    }
}

/// Payload of a `Course` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseRuleData {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Thresholds and the course array.
    pub requirement: CourseRequirement,
}

/// Thresholds and course criteria of a `Course` rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRequirement {
    /// Minimum class count (string-encoded integer).
    #[serde(rename = "classesBegin", default)]
    pub classes_begin: Option<String>,
    /// Maximum class count; recorded but not enforced.
    #[serde(rename = "classesEnd", default)]
    pub classes_end: Option<String>,
    /// Minimum credit sum (string-encoded decimal).
    #[serde(rename = "creditsBegin", default)]
    pub credits_begin: Option<String>,
    /// Maximum credit sum; recorded but not enforced.
    #[serde(rename = "creditsEnd", default)]
    pub credits_end: Option<String>,
    /// The matchable courses.
    #[serde(rename = "courseArray", default)]
    pub course_array: Vec<CourseArrayEntry>,
}

/// One discipline/number(-range) match within a course array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseArrayEntry {
    /// Subject code; `"@"` (or empty) is the wildcard.
    #[serde(default)]
    pub discipline: String,
    /// Course number; `"@"` (or empty) is the wildcard.
    #[serde(default)]
    pub number: String,
    /// End of a number range, when the entry matches a range.
    #[serde(rename = "numberEnd", default)]
    pub number_end: Option<String>,
    /// Connector to the preceding entry: `"AND"`/`"+"` conjoin,
    /// `"OR"`/empty disjoin.
    #[serde(default)]
    pub connector: String,
    /// Refining sub-filters.
    #[serde(rename = "withArray", default)]
    pub with_array: Vec<WithFilter>,
}

/// One `withArray` refinement on a course-array entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WithFilter {
    /// Filter kind: `"ATTRIBUTE"`, `"DWTERM"`, `"DWCOLLEGE"`, and the
    /// ignored residency/grade kinds.
    #[serde(default)]
    pub code: String,
    /// The filter's accepted values.
    #[serde(rename = "valueList", default)]
    pub value_list: Vec<String>,
}

/// Payload of an `IfStmt` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct IfStmtData {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// The condition and its branches.
    pub requirement: IfStmtRequirement,
}

/// Condition plus branches of an `IfStmt`.
#[derive(Debug, Clone, Deserialize)]
pub struct IfStmtRequirement {
    /// The condition tree.
    #[serde(rename = "leftCondition")]
    pub left_condition: Condition,
    /// Rules applied when the condition holds.
    #[serde(rename = "ifPart", default)]
    pub if_part: Option<RulePart>,
    /// Rules applied when the condition does not hold.
    #[serde(rename = "elsePart", default)]
    pub else_part: Option<RulePart>,
}

/// A branch of an `IfStmt`: a nested rule array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulePart {
    /// The branch's rules.
    #[serde(rename = "ruleArray", default)]
    pub rule_array: Vec<AuditRule>,
}

/// A condition tree node: either a relational comparison or a
/// connector over two sub-conditions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    /// `"AND"` / `"OR"` when this node combines two sub-conditions.
    #[serde(default)]
    pub connector: Option<String>,
    /// Left sub-condition of a connector node.
    #[serde(rename = "leftCondition", default)]
    pub left_condition: Option<Box<Condition>>,
    /// Right sub-condition of a connector node.
    #[serde(rename = "rightCondition", default)]
    pub right_condition: Option<Box<Condition>>,
    /// The comparison of a relational node.
    #[serde(rename = "relationalOperator", default)]
    pub relational_operator: Option<RelationalOperator>,
}

/// A relational comparison: `left operator right`.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationalOperator {
    /// Left-hand attribute name (`"MAJOR"`, `"CONC"`, `"PROGRAM"`, …).
    #[serde(default)]
    pub left: String,
    /// Comparator: `"="` or `"<>"`.
    #[serde(default)]
    pub operator: String,
    /// Right-hand literal.
    #[serde(default)]
    pub right: String,
}

/// Payload of a `Group` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupData {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// The pick-count requirement.
    pub requirement: GroupRequirement,
    /// The group's alternatives.
    #[serde(rename = "ruleArray", default)]
    pub rule_array: Vec<AuditRule>,
}

/// The `numberOfGroups` requirement of a `Group` rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupRequirement {
    /// How many of the alternatives must be satisfied (string-encoded).
    #[serde(rename = "numberOfGroups", default)]
    pub number_of_groups: String,
}

/// Payload of a `Subset` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct SubsetData {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// The rules to splice into the parent list. `None` marks a malformed
    /// export; the subset is skipped with a warning.
    #[serde(rename = "ruleArray", default)]
    pub rule_array: Option<Vec<AuditRule>>,
}

/// Payload shared by the structural marker rule types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkerData {
    /// Display label.
    #[serde(default)]
    pub label: String,
}
