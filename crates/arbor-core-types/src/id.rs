//! Stable content-item identifiers
//!
//! Every item in the backing store carries exactly one `ItemId`, assigned at
//! creation and unchanged for the life of the item. Moves and renames alter
//! an item's path, never its id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identifier for a content item
///
/// The canonical textual form is the hyphenated lowercase UUID rendering;
/// `parse` accepts exactly what `Display` produces (plus the usual UUID
/// textual variants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random ItemId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil id, used only as a sentinel for dangling relation endpoints
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Check whether this is the nil sentinel
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parse an id from its canonical textual form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// Check whether a string is a well-formed item id
    pub fn is_valid(s: &str) -> bool {
        Uuid::parse_str(s).is_ok()
    }

    /// Access the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
