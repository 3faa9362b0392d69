//! Backing-store capability
//!
//! The hierarchical storage engine itself is outside this crate; it is
//! specified entirely by the `ContentStore` trait. The trait covers item
//! reads by id and path, one-level child listing, tree mutation, property
//! and content access, the lock-manager capability (`try_lock`/`unlock`),
//! and relation enumeration. Implementations are expected to be internally
//! synchronized; the facade calls them through `&self`.

use chrono::{DateTime, Utc};
use thiserror::Error;

use arbor_core_types::ItemId;

use crate::errors::RepoError;
use crate::model::{AccessEntry, ContentItem, ItemKind, PropertyBag, Relation, RelationDirection};

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error domain of the backing store
///
/// The repository core translates these at its boundary: not-found and
/// authentication failures keep their meaning, name collisions become name
/// constraint violations, and everything else is wrapped as a generic
/// backend failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No item carries the given id
    #[error("No item with id {id}")]
    ItemNotFound { id: ItemId },

    /// No item exists at the given path
    #[error("No item at path {path}")]
    PathNotFound { path: String },

    /// An item already exists at the target path
    #[error("An item already exists at {path}")]
    AlreadyExists { path: String },

    /// The item's lock is held by another principal
    #[error("Item {id} is locked by {held_by}")]
    LockContention { id: ItemId, held_by: String },

    /// Credentials were rejected
    #[error("Authentication failed for {username}")]
    AuthenticationFailed { username: String },

    /// Anything else the store cannot classify
    #[error("{message}")]
    Other { message: String },
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound { id } => RepoError::NotFound {
                object: id.to_string(),
            },
            StoreError::PathNotFound { path } => RepoError::NotFound { object: path },
            StoreError::AlreadyExists { path } => RepoError::NameConstraintViolation {
                reason: format!("an item already exists at {}", path),
            },
            StoreError::AuthenticationFailed { username } => RepoError::PermissionDenied {
                reason: format!("authentication failed for {}", username),
            },
            other => RepoError::Backend {
                message: other.to_string(),
            },
        }
    }
}

/// An authenticated backing-store session
///
/// Sessions are built per call from the call context's credentials and are
/// never cached or shared across calls. The principal identifies the caller
/// for lock ownership and access decisions.
#[derive(Debug, Clone)]
pub struct Session {
    principal: String,
}

impl Session {
    /// Create a session for an authenticated principal
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }

    /// The authenticated principal name
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

/// The capability the hierarchical backing store must present
///
/// `try_lock` returns `true` when the lock was newly acquired for this
/// session's principal, `false` when the principal already held it, and
/// `LockContention` when another principal holds it. `unlock` on a free
/// item is a no-op. `delete_item` removes the item and its subtree while
/// leaving siblings untouched.
pub trait ContentStore: Send + Sync {
    /// Authenticate credentials and open a per-call session
    fn open_session(&self, username: Option<&str>, password: Option<&str>) -> StoreResult<Session>;

    fn read_item(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem>;

    fn read_item_by_path(&self, session: &Session, path: &str) -> StoreResult<ContentItem>;

    fn read_parent(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem>;

    fn list_children(&self, session: &Session, id: ItemId) -> StoreResult<Vec<ContentItem>>;

    /// Create an item; the new item is left locked by this session
    fn create_item(
        &self,
        session: &Session,
        path: &str,
        kind: ItemKind,
        content: Option<Vec<u8>>,
        properties: PropertyBag,
    ) -> StoreResult<ContentItem>;

    /// Deep-copy an item (and subtree) to a new path; the copy is left
    /// locked by this session
    fn copy_item(&self, session: &Session, source_path: &str, target_path: &str)
        -> StoreResult<ContentItem>;

    fn move_item(&self, session: &Session, source_path: &str, target_path: &str) -> StoreResult<()>;

    fn delete_item(&self, session: &Session, path: &str) -> StoreResult<()>;

    /// Merge the given properties into the item's property bag
    fn write_properties(&self, session: &Session, id: ItemId, properties: PropertyBag) -> StoreResult<()>;

    fn read_content(&self, session: &Session, id: ItemId) -> StoreResult<Vec<u8>>;

    fn write_content(&self, session: &Session, id: ItemId, content: Vec<u8>) -> StoreResult<()>;

    /// Overwrite the item's modification timestamp
    fn restamp_modified(
        &self,
        session: &Session,
        id: ItemId,
        modified_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    fn read_access_entries(&self, session: &Session, id: ItemId) -> StoreResult<Vec<AccessEntry>>;

    fn try_lock(&self, session: &Session, id: ItemId) -> StoreResult<bool>;

    fn unlock(&self, session: &Session, id: ItemId) -> StoreResult<()>;

    /// Enumerate relations anchored at an item, in store order
    fn relations_of(
        &self,
        session: &Session,
        id: ItemId,
        direction: RelationDirection,
    ) -> StoreResult<Vec<Relation>>;

    fn add_relation(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
        type_name: &str,
    ) -> StoreResult<()>;

    /// Resolve the default item kind for a new item name
    fn default_kind_for_name(&self, name: &str) -> ItemKind;
}
