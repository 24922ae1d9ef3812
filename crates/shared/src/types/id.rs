//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `RenterId` where an
//! `ItemId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a renter.
///
/// This is the opaque caller identity supplied by the authenticated
/// transport layer; the engine never mints one itself outside of tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenterId(pub Uuid);

impl RenterId {
    /// Creates a new random ID using UUID v7 (time-ordered).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RenterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RenterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RenterId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a rentable item.
///
/// Items are numbered sequentially starting at 1; ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The first id the registry hands out.
    pub const FIRST: Self = Self(1);

    /// Creates an ID from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_renter_id_from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = RenterId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(RenterId::from_str(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_renter_id_serde_transparent() {
        let id = RenterId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::nil()));
    }

    #[test]
    fn test_item_id_ordering_and_next() {
        assert_eq!(ItemId::FIRST.into_inner(), 1);
        assert_eq!(ItemId::FIRST.next(), ItemId::from_raw(2));
        assert!(ItemId::from_raw(2) < ItemId::from_raw(10));
    }

    #[test]
    fn test_item_id_display_and_parse() {
        let id = ItemId::from_raw(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(ItemId::from_str("42").unwrap(), id);
        assert!(ItemId::from_str("not-a-number").is_err());
    }
}
