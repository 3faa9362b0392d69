//! Protocol-facing object representations
//!
//! These are the outbound shapes consumed by a protocol binding: mapped
//! objects, in-folder wrappers, parent data, descendant tree nodes, and the
//! content-stream carriers. They are plain data with no behavior beyond
//! construction helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use arbor_core_types::ItemId;

use super::acl::AclEntry;
use super::actions::AllowableAction;
use super::property::PropertyBag;

/// Base kind discriminator of a mapped object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseKind {
    Folder,
    Document,
    Relationship,
}

/// Content-stream descriptor carried on mapped documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStreamInfo {
    /// Content length in bytes
    pub length: u64,
    /// Mime type derived from the path extension, with a fixed fallback
    pub mime_type: String,
    /// Fixed stream identifier
    pub stream_id: String,
    /// File name of the backing document
    pub file_name: String,
}

/// Whole-object content retrieval result
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStreamData {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ContentStreamData {
    pub fn length(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A mapped, protocol-facing object representation
///
/// Built by the object mappers from either a native content item or a
/// relationship triple. Optional sections (content stream, endpoints,
/// allowable actions, ACL) are populated according to the object kind and
/// the caller's flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRepr {
    /// External object id: item id text, or a synthesized relationship id
    pub object_id: String,
    /// Object name
    pub name: String,
    /// Base kind discriminator
    pub base_kind: BaseKind,
    /// Declared type id under the repository namespace
    pub type_id: String,
    /// Absolute path; absent for relationships
    pub path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Filtered property bag
    pub properties: PropertyBag,
    /// Content-stream descriptor; documents only
    pub content_stream: Option<ContentStreamInfo>,
    /// Source endpoint; relationships only
    pub source_id: Option<ItemId>,
    /// Target endpoint; relationships only
    pub target_id: Option<ItemId>,
    /// Allowable actions, when requested
    pub allowable_actions: Option<BTreeSet<AllowableAction>>,
    /// Coarse ACL, when requested
    pub acl: Option<Vec<AclEntry>>,
}

/// A mapped object inside a folder listing, with its optional path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInFolder {
    pub object: ObjectRepr,
    /// The child's name, when path segments were requested
    pub path_segment: Option<String>,
}

/// A mapped parent object plus the child's relative path segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentData {
    pub object: ObjectRepr,
    pub relative_path_segment: Option<String>,
}

/// A node of a descendant tree
///
/// `children` is `None` for a node that was not expanded (the depth limit
/// was reached, or the node is a document) and `Some` with zero or more
/// entries for a node that was expanded. Callers rely on this distinction
/// to tell "not explored" from "explored, empty".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub object: ObjectInFolder,
    pub children: Option<Vec<TreeNode>>,
}

/// Failure report of a subtree deletion
///
/// Subtree deletion is all-or-nothing in this design, so the report is
/// always empty on success; the type exists for forward compatibility with
/// stores that can partially fail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteTreeResult {
    pub failed_ids: Vec<String>,
}

impl DeleteTreeResult {
    pub fn is_complete(&self) -> bool {
        self.failed_ids.is_empty()
    }
}
