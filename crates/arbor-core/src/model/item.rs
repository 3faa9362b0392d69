use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arbor_core_types::ItemId;

use super::property::PropertyBag;
use crate::paths;

/// Kind discriminator for content items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    Document,
}

/// Lock state of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    /// No lock is held
    Free,
    /// A principal holds the lock
    Held { by: String },
}

impl LockState {
    /// Whether any principal holds the lock
    pub fn is_held(&self) -> bool {
        matches!(self, LockState::Held { .. })
    }

    /// The holding principal, if any
    pub fn holder(&self) -> Option<&str> {
        match self {
            LockState::Free => None,
            LockState::Held { by } => Some(by),
        }
    }
}

/// A folder or document node in the hierarchical backing store
///
/// The id is assigned at creation and never changes; the path is derived
/// from the parent chain and changes on move or rename. Content bytes are
/// read and written through the store, not carried on the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable unique identifier
    pub id: ItemId,

    /// Normalized absolute path (`/` for the root folder)
    pub path: String,

    /// Folder or document
    pub kind: ItemKind,

    /// Named property bag
    pub properties: PropertyBag,

    /// Content length in bytes; zero for folders
    pub content_length: u64,

    /// Timestamp when this item was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this item was last modified
    pub modified_at: DateTime<Utc>,

    /// Current lock state
    pub lock: LockState,
}

impl ContentItem {
    /// The item name, i.e. the last path segment (empty for the root)
    pub fn name(&self) -> &str {
        paths::name(&self.path)
    }

    /// The parent folder path, or `None` for the root
    pub fn parent_path(&self) -> Option<String> {
        paths::parent(&self.path)
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    pub fn is_document(&self) -> bool {
        self.kind == ItemKind::Document
    }
}
