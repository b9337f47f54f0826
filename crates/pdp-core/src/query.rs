//! # Course-Matching Predicate AST
//!
//! [`CourseQuery`] is the course-set criterion carried by leaf rules:
//! a tagged-variant tree of field matches combined with conjunction and
//! disjunction. It is evaluated structurally against a
//! [`CourseRecord`] — nothing re-parses a query language at evaluation time,
//! and the audit translator emits this AST directly.

use serde::{Deserialize, Serialize};

use crate::course::{CourseCode, CourseRecord, Semester};

/// A predicate over course attributes.
///
/// Leaves match one field of a [`CourseRecord`]; `And`/`Or` combine
/// sub-queries. `And` of an empty list is vacuously true and `Or` of an
/// empty list is false, matching the usual fold identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseQuery {
    /// Matches every course. Produced for full-wildcard audit entries.
    Any,
    /// Exact full-code match.
    FullCode(CourseCode),
    /// Department (subject code) match.
    Department(String),
    /// Department membership in a fixed list (school/college filters).
    DepartmentIn(Vec<String>),
    /// Numeric course-number range, inclusive on both ends. Courses whose
    /// number is not purely numeric never match a range.
    CodeRange {
        /// Lowest matching course number.
        begin: u32,
        /// Highest matching course number.
        end: u32,
    },
    /// Registrar attribute tag membership.
    Attribute(String),
    /// Term match.
    InSemester(Semester),
    /// All sub-queries must match.
    And(Vec<CourseQuery>),
    /// At least one sub-query must match.
    Or(Vec<CourseQuery>),
}

impl CourseQuery {
    /// Evaluate this predicate against one course record.
    pub fn matches(&self, course: &CourseRecord) -> bool {
        match self {
            Self::Any => true,
            Self::FullCode(code) => course.full_code == *code,
            Self::Department(dept) => course.full_code.department() == dept,
            Self::DepartmentIn(depts) => depts
                .iter()
                .any(|d| course.full_code.department() == d),
            Self::CodeRange { begin, end } => course
                .full_code
                .numeric()
                .is_some_and(|n| n >= *begin && n <= *end),
            Self::Attribute(attr) => course.attributes.iter().any(|a| a == attr),
            Self::InSemester(sem) => course.semester.as_ref() == Some(sem),
            Self::And(queries) => queries.iter().all(|q| q.matches(course)),
            Self::Or(queries) => queries.iter().any(|q| q.matches(course)),
        }
    }

    /// Conjoin a list of queries, collapsing the trivial cases:
    /// an empty list becomes [`CourseQuery::Any`] and a single query is
    /// returned unchanged.
    pub fn and(mut queries: Vec<CourseQuery>) -> CourseQuery {
        match queries.len() {
            0 => Self::Any,
            1 => queries.remove(0),
            _ => Self::And(queries),
        }
    }

    /// Disjoin a list of queries, collapsing the single-element case.
    /// An empty list stays `Or([])`, which matches nothing.
    pub fn or(mut queries: Vec<CourseQuery>) -> CourseQuery {
        match queries.len() {
            1 => queries.remove(0),
            _ => Self::Or(queries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::Credits;

    fn course(full_code: &str) -> CourseRecord {
        CourseRecord::new(CourseCode::new(full_code).unwrap())
    }

    #[test]
    fn any_matches_everything() {
        assert!(CourseQuery::Any.matches(&course("CIS-1200")));
        assert!(CourseQuery::Any.matches(&course("HIST-0100")));
    }

    #[test]
    fn full_code_is_exact() {
        let q = CourseQuery::FullCode(CourseCode::new("CIS-1200").unwrap());
        assert!(q.matches(&course("CIS-1200")));
        assert!(!q.matches(&course("CIS-1210")));
    }

    #[test]
    fn department_match() {
        let q = CourseQuery::Department("CIS".to_string());
        assert!(q.matches(&course("CIS-1200")));
        assert!(!q.matches(&course("MATH-1400")));
    }

    #[test]
    fn department_in_matches_membership() {
        let q = CourseQuery::DepartmentIn(vec!["CIS".to_string(), "ESE".to_string()]);
        assert!(q.matches(&course("ESE-2150")));
        assert!(!q.matches(&course("MATH-1400")));
    }

    #[test]
    fn code_range_is_inclusive() {
        let q = CourseQuery::CodeRange {
            begin: 1900,
            end: 1999,
        };
        assert!(q.matches(&course("CIS-1900")));
        assert!(q.matches(&course("CIS-1999")));
        assert!(!q.matches(&course("CIS-2000")));
        assert!(!q.matches(&course("CIS-1899")));
    }

    #[test]
    fn code_range_skips_non_numeric_numbers() {
        let q = CourseQuery::CodeRange {
            begin: 1000,
            end: 1999,
        };
        assert!(!q.matches(&course("CIS-1200R")));
    }

    #[test]
    fn attribute_membership() {
        let mut record = course("CIS-1200");
        record.attributes.push("EUNE".to_string());
        assert!(CourseQuery::Attribute("EUNE".to_string()).matches(&record));
        assert!(!CourseQuery::Attribute("WUOM".to_string()).matches(&record));
    }

    #[test]
    fn in_semester_requires_known_term() {
        let q = CourseQuery::InSemester(Semester::new("2024C").unwrap());
        let mut record = course("CIS-1200");
        assert!(!q.matches(&record), "planned course has no term");
        record.semester = Some(Semester::new("2024C").unwrap());
        assert!(q.matches(&record));
    }

    #[test]
    fn and_or_combinators() {
        let cis_19xx = CourseQuery::And(vec![
            CourseQuery::Department("CIS".to_string()),
            CourseQuery::CodeRange {
                begin: 1900,
                end: 1999,
            },
        ]);
        assert!(cis_19xx.matches(&course("CIS-1912")));
        assert!(!cis_19xx.matches(&course("MATH-1912")));

        let either = CourseQuery::Or(vec![
            CourseQuery::FullCode(CourseCode::new("CIS-1200").unwrap()),
            CourseQuery::FullCode(CourseCode::new("CIS-1600").unwrap()),
        ]);
        assert!(either.matches(&course("CIS-1600")));
        assert!(!either.matches(&course("CIS-1100")));
    }

    #[test]
    fn empty_and_is_vacuous_empty_or_is_false() {
        let c = course("CIS-1200");
        assert!(CourseQuery::And(vec![]).matches(&c));
        assert!(!CourseQuery::Or(vec![]).matches(&c));
    }

    #[test]
    fn and_constructor_collapses() {
        assert_eq!(CourseQuery::and(vec![]), CourseQuery::Any);
        let single = CourseQuery::Department("CIS".to_string());
        assert_eq!(CourseQuery::and(vec![single.clone()]), single);
    }

    #[test]
    fn or_constructor_collapses_single() {
        let single = CourseQuery::Department("CIS".to_string());
        assert_eq!(CourseQuery::or(vec![single.clone()]), single);
        assert_eq!(CourseQuery::or(vec![]), CourseQuery::Or(vec![]));
    }

    #[test]
    fn query_serde_roundtrip() {
        let q = CourseQuery::And(vec![
            CourseQuery::Department("CIS".to_string()),
            CourseQuery::Or(vec![
                CourseQuery::CodeRange {
                    begin: 1000,
                    end: 1999,
                },
                CourseQuery::Attribute("EUNE".to_string()),
            ]),
        ]);
        let json = serde_json::to_string(&q).unwrap();
        let back: CourseQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn matching_ignores_credits() {
        let mut record = course("CIS-1200");
        record.credits = Some(Credits::from_hundredths(100));
        assert!(CourseQuery::Department("CIS".to_string()).matches(&record));
    }
}
