//! # School → Department Lookup
//!
//! DegreeWorks `DWCOLLEGE`/`DWSCHOOL` filters restrict a course match to a
//! school or college. The engine's course records expose only department
//! codes, so school membership is resolved through this fixed lookup table
//! into a department-list query.
//!
//! The table is intentionally static configuration: department rosters
//! change on catalog timescales, and translation runs offline at
//! catalog-setup time.

/// Departments of the School of Engineering and Applied Science.
const ENGINEERING: &[&str] = &[
    "BE", "CBE", "CIS", "EAS", "ESE", "IPD", "MEAM", "MSE", "NETS", "ROBO",
];

/// Departments of the Wharton School.
const WHARTON: &[&str] = &[
    "ACCT", "BEPP", "FNCE", "HCMG", "LGST", "MGMT", "MKTG", "OIDD", "REAL", "STAT",
];

/// Departments of the School of Nursing.
const NURSING: &[&str] = &["NURS"];

/// Departments of the College of Arts and Sciences.
const COLLEGE: &[&str] = &[
    "ANTH", "BIBB", "BIOL", "CHEM", "CLST", "COML", "CRIM", "EALC", "ECON", "ENGL", "ENVS",
    "FREN", "GRMN", "HIST", "HSOC", "INTL", "ITAL", "LING", "MATH", "MUSC", "NELC", "PHIL",
    "PHYS", "PPE", "PSCI", "PSYC", "RELS", "ROML", "SOCI", "SPAN", "STSC", "URBS", "VLST",
];

/// Resolve a school/college code to its department roster.
///
/// Accepts both the bare division letters and the `-U` undergraduate
/// variants that appear in audit exports (`"E"`/`"EU"` engineering,
/// `"A"`/`"AU"` arts and sciences, `"W"`/`"WU"` Wharton,
/// `"N"`/`"NU"` nursing). Returns `None` for unrecognized codes; the
/// translator surfaces those as errors rather than guessing.
pub fn school_departments(code: &str) -> Option<&'static [&'static str]> {
    match code.trim().to_uppercase().as_str() {
        "E" | "EU" | "SEAS" => Some(ENGINEERING),
        "A" | "AU" | "SAS" => Some(COLLEGE),
        "W" | "WU" | "WH" => Some(WHARTON),
        "N" | "NU" | "NURS" => Some(NURSING),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engineering_variants_resolve() {
        for code in ["E", "EU", "seas"] {
            let depts = school_departments(code).unwrap();
            assert!(depts.contains(&"CIS"));
            assert!(depts.contains(&"MEAM"));
        }
    }

    #[test]
    fn wharton_does_not_contain_engineering_departments() {
        let depts = school_departments("WU").unwrap();
        assert!(depts.contains(&"FNCE"));
        assert!(!depts.contains(&"CIS"));
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(school_departments("ZZ").is_none());
        assert!(school_departments("").is_none());
    }

    #[test]
    fn rosters_are_disjoint() {
        for dept in ENGINEERING {
            assert!(!COLLEGE.contains(dept));
            assert!(!WHARTON.contains(dept));
            assert!(!NURSING.contains(dept));
        }
    }
}
