//! # Course Primitives
//!
//! Validated newtypes for the course-catalog values the engine consumes:
//! full course codes, term codes, and credit units, plus the
//! [`CourseRecord`] view of a historical course.
//!
//! ## Validation
//!
//! [`CourseCode`] and [`Semester`] validate format at construction time and
//! normalize to uppercase, so downstream comparisons are plain equality.
//! [`Credits`] stores an exact integer count of hundredths of a credit unit;
//! float input is rejected rather than rounded, and serde round-trips through
//! the decimal string form.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// CourseCode
// ---------------------------------------------------------------------------

/// A canonical full course code: department, dash, course number
/// (e.g. `"CIS-1200"`, `"MEAM-2470"`).
///
/// # Validation
///
/// - Department: 1-8 ASCII letters.
/// - Dash separator.
/// - Number: 3-5 ASCII alphanumerics starting with a digit (suffixed codes
///   such as `"1200R"` are accepted).
/// - Stored uppercase; input is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Create a course code from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCourseCode`] if the string does not
    /// match the `DEPT-NUMBER` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();

        let (dept, number) = match upper.split_once('-') {
            Some(parts) => parts,
            None => return Err(ValidationError::InvalidCourseCode(raw)),
        };

        if dept.is_empty() || dept.len() > 8 || !dept.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCourseCode(raw));
        }
        let starts_with_digit = number.chars().next().is_some_and(|c| c.is_ascii_digit());
        if number.len() < 3
            || number.len() > 5
            || !starts_with_digit
            || !number.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidCourseCode(raw));
        }

        Ok(Self(upper))
    }

    /// Access the full code string (uppercase).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The department portion of the code (before the dash).
    pub fn department(&self) -> &str {
        let dash = self.0.find('-').expect("validated at construction");
        &self.0[..dash]
    }

    /// The course number portion of the code (after the dash).
    pub fn number(&self) -> &str {
        let dash = self.0.find('-').expect("validated at construction");
        &self.0[dash + 1..]
    }

    /// The numeric value of the course number's leading digits, if the
    /// number is purely numeric. Suffixed codes (`"1200R"`) return `None`
    /// so that range queries never match them by accident.
    pub fn numeric(&self) -> Option<u32> {
        self.number().parse().ok()
    }
}

impl TryFrom<String> for CourseCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseCode> for String {
    fn from(code: CourseCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Semester
// ---------------------------------------------------------------------------

/// A term code: four-digit year plus season letter (e.g. `"2024C"`).
///
/// Season letters follow the registrar convention: `A` = spring,
/// `B` = summer, `C` = fall.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semester(String);

impl Semester {
    /// Create a term code from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSemester`] unless the string is
    /// four digits followed by `A`, `B`, or `C` (lowercase accepted).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();

        // Byte-wise check: a valid term code is ASCII throughout, so any
        // multibyte input fails without risking a slice panic.
        let bytes = upper.as_bytes();
        let valid = bytes.len() == 5
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && matches!(bytes[4], b'A' | b'B' | b'C');
        if !valid {
            return Err(ValidationError::InvalidSemester(raw));
        }
        Ok(Self(upper))
    }

    /// Access the term code string (uppercase).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar year of the term.
    pub fn year(&self) -> u16 {
        self.0[..4].parse().expect("validated at construction")
    }

    /// The season letter: `'A'` spring, `'B'` summer, `'C'` fall.
    pub fn season(&self) -> char {
        self.0.chars().nth(4).expect("validated at construction")
    }
}

impl TryFrom<String> for Semester {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Semester> for String {
    fn from(sem: Semester) -> Self {
        sem.0
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// An exact credit-unit quantity, stored as hundredths of a credit.
///
/// Course units come in halves and quarters (`0.5`, `1`, `1.5`); storing
/// hundredths keeps sums and threshold comparisons exact. Floats are
/// rejected at the parse boundary instead of rounded, and serde uses the
/// decimal string form (`"1.5"`), never a JSON float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Credits(u32);

impl Credits {
    /// Zero credit units.
    pub const ZERO: Credits = Credits(0);

    /// Create a credit quantity from a hundredths count
    /// (`150` means 1.5 credit units).
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// The quantity as a hundredths count.
    pub fn hundredths(&self) -> u32 {
        self.0
    }

    /// Parse a decimal credit string (`"1"`, `"0.5"`, `"1.50"`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCredits`] for negative values,
    /// more than two decimal places, or non-numeric input.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let s = value.trim();
        let invalid = |reason: &str| ValidationError::InvalidCredits {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty string"));
        }
        if s.starts_with('-') {
            return Err(invalid("credits cannot be negative"));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are supported"));
        }

        let whole: u32 = whole
            .parse()
            .map_err(|_| invalid("whole part out of range"))?;
        let frac_hundredths = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().expect("digits checked") * 10,
            _ => frac.parse::<u32>().expect("digits checked"),
        };

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac_hundredths))
            .map(Self)
            .ok_or_else(|| invalid("value out of range"))
    }
}

impl Add for Credits {
    type Output = Credits;

    fn add(self, rhs: Credits) -> Credits {
        Credits(self.0 + rhs.0)
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Credits) {
        self.0 += rhs.0;
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Credits {
        iter.fold(Credits::ZERO, Add::add)
    }
}

impl std::fmt::Display for Credits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{whole}.{}", frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}")
        }
    }
}

impl Serialize for Credits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Accepted wire forms for a credit value: a decimal string or a bare
/// integer. JSON floats are not listed, so they fail deserialization.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreditsRepr {
    Int(u64),
    Str(String),
}

impl<'de> Deserialize<'de> for Credits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = CreditsRepr::deserialize(deserializer)?;
        let parsed = match repr {
            CreditsRepr::Int(i) => Credits::parse(&i.to_string()),
            CreditsRepr::Str(s) => Credits::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CourseRecord
// ---------------------------------------------------------------------------

/// The engine's view of one historical course, as resolved by the course
/// catalog collaborator.
///
/// Carries exactly the attribute data needed to answer a
/// [`CourseQuery`](crate::query::CourseQuery) plus the credit value used for
/// credit-sum thresholds. Everything else about a course is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// The canonical full code.
    pub full_code: CourseCode,
    /// Credit units, if the catalog knows them. Missing credits count as
    /// zero toward credit thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    /// The term the course record belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
    /// Registrar attribute tags (e.g. `"EUNE"`, `"WUOM"`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl CourseRecord {
    /// Create a record with just a full code; credits, semester, and
    /// attributes start unset.
    pub fn new(full_code: CourseCode) -> Self {
        Self {
            full_code,
            credits: None,
            semester: None,
            attributes: Vec::new(),
        }
    }

    /// The credit value used in threshold sums: the catalog value, or zero
    /// when the catalog has none.
    pub fn effective_credits(&self) -> Credits {
        self.credits.unwrap_or(Credits::ZERO)
    }
}
