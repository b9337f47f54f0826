//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the degree plan
//! engine. Each identifier is a distinct type — you cannot pass a [`RuleId`]
//! where a [`FulfillmentId`] is expected.
//!
//! All identifiers here are UUID-based and always valid by construction.
//! String-based primitives that require format validation (course codes,
//! term codes) live in [`crate::course`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a requirement rule node within a degree plan's
/// rule tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(Uuid);

impl RuleId {
    /// Create a new random rule identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a rule identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a versioned degree plan (one program/degree/major/
/// concentration/year requirement specification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DegreePlanId(Uuid);

impl DegreePlanId {
    /// Create a new random degree plan identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a degree plan identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DegreePlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DegreePlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for one student's personal instance of a degree plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserDegreePlanId(Uuid);

impl UserDegreePlanId {
    /// Create a new random user degree plan identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user degree plan identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserDegreePlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserDegreePlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a fulfillment (one claimed course/semester pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FulfillmentId(Uuid);

impl FulfillmentId {
    /// Create a new random fulfillment identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a fulfillment identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FulfillmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FulfillmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a double-count restriction between two rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestrictionId(Uuid);

impl RestrictionId {
    /// Create a new random restriction identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a restriction identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RestrictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RestrictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_id_unique() {
        let a = RuleId::new();
        let b = RuleId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn rule_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = RuleId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn fulfillment_id_unique() {
        let a = FulfillmentId::new();
        let b = FulfillmentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_distinct_types() {
        // Compile-time property; this test just documents the intent.
        let rule = RuleId::new();
        let plan = DegreePlanId::from_uuid(*rule.as_uuid());
        assert_eq!(rule.as_uuid(), plan.as_uuid());
    }

    #[test]
    fn id_display_is_uuid_format() {
        let id = RestrictionId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36);
        assert_eq!(s.matches('-').count(), 4);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = UserDegreePlanId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: UserDegreePlanId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
