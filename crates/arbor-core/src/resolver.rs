//! External identifier classification
//!
//! Every single-object entry point accepts an external id string that names
//! either a plain content item (canonical UUID text) or a synthesized
//! relationship (`REL_<src>_<tgt>_<type>`). Classification happens once,
//! here, producing a tagged union the facade matches on; call sites never
//! re-derive the kind from the string shape.

use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::{RelationshipId, RELATIONSHIP_ID_MARKER};

/// A classified external object reference
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectRef {
    /// A plain content item
    Item(ItemId),
    /// A synthesized relationship pseudo-object
    Relationship(RelationshipId),
}

impl ObjectRef {
    /// Classify an external id string, or fail with `InvalidId`
    pub fn classify(id: &str) -> Result<Self> {
        if let Ok(item_id) = ItemId::parse(id) {
            return Ok(ObjectRef::Item(item_id));
        }
        if id.starts_with(RELATIONSHIP_ID_MARKER) {
            return RelationshipId::parse(id).map(ObjectRef::Relationship);
        }
        Err(RepoError::InvalidId { id: id.to_string() })
    }

    /// The item id, if this reference names a plain content item
    pub fn as_item(&self) -> Option<ItemId> {
        match self {
            ObjectRef::Item(id) => Some(*id),
            ObjectRef::Relationship(_) => None,
        }
    }
}

/// Classify an id that must name a plain content item
///
/// Fails with `InvalidArgument` for relationship ids; used by entry points
/// that only operate on items (children, parents, content, moves).
pub fn require_item(id: &str) -> Result<ItemId> {
    match ObjectRef::classify(id)? {
        ObjectRef::Item(item_id) => Ok(item_id),
        ObjectRef::Relationship(_) => Err(RepoError::InvalidArgument {
            reason: format!("not a content item id: {}", id),
        }),
    }
}
