use serde::{Deserialize, Serialize};

use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};

/// Marker prefix of every synthesized relationship id
pub const RELATIONSHIP_ID_MARKER: &str = "REL_";

/// Field delimiter inside a relationship id
const DELIMITER: char = '_';

/// A directed, typed link between two content items
///
/// Relations are not first-class stored nodes; they are read from the
/// backing store's relation index as (source, target, type) triples. Two
/// relations are identical iff all three components match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub source_id: ItemId,
    pub target_id: ItemId,
    pub type_name: String,
}

/// Direction filter for relation enumeration relative to an anchor item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationDirection {
    /// Relations whose source is the anchor
    Outgoing,
    /// Relations whose target is the anchor
    Incoming,
    /// Both directions
    Either,
}

/// The synthesized external identifier of a relationship
///
/// Textual form: `REL_<sourceId>_<targetId>_<typeName>`. Parsing
/// reconstructs exactly the triple that produced the id; any other shape
/// (wrong marker, field count other than three, malformed endpoint ids)
/// is rejected as `InvalidId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipId {
    pub source_id: ItemId,
    pub target_id: ItemId,
    pub type_name: String,
}

impl RelationshipId {
    /// Parse a relationship id from its textual form
    pub fn parse(id: &str) -> Result<Self> {
        let invalid = || RepoError::InvalidId { id: id.to_string() };

        let rest = id.strip_prefix(RELATIONSHIP_ID_MARKER).ok_or_else(invalid)?;
        let fields: Vec<&str> = rest.split(DELIMITER).collect();
        if fields.len() != 3 {
            return Err(invalid());
        }

        let source_id = ItemId::parse(fields[0]).map_err(|_| invalid())?;
        let target_id = ItemId::parse(fields[1]).map_err(|_| invalid())?;
        let type_name = fields[2];
        if type_name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            source_id,
            target_id,
            type_name: type_name.to_string(),
        })
    }

    /// Whether a relation triple matches this id componentwise
    pub fn matches(&self, relation: &Relation) -> bool {
        relation.source_id == self.source_id
            && relation.target_id == self.target_id
            && relation.type_name == self.type_name
    }
}

impl From<&Relation> for RelationshipId {
    fn from(relation: &Relation) -> Self {
        Self {
            source_id: relation.source_id,
            target_id: relation.target_id,
            type_name: relation.type_name.clone(),
        }
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}",
            RELATIONSHIP_ID_MARKER, self.source_id, DELIMITER, self.target_id, DELIMITER, self.type_name
        )
    }
}
