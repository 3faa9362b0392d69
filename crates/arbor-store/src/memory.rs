//! Hash-map backed `ContentStore`
//!
//! All state lives behind one `RwLock<Inner>` so the store can be shared as
//! `Arc<MemoryStore>` and called through `&self`. Child listings are
//! returned in lexical name order, which is this store's "store order".
//! Locks are keyed by item id, so a held lock survives moves and renames.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use arbor_core_types::ItemId;

use arbor_core::model::{
    AccessEntry, ContentItem, ItemKind, LockState, PropertyBag, Relation, RelationDirection,
};
use arbor_core::store::{ContentStore, Session, StoreError, StoreResult};
use arbor_core::paths;

/// The principal assigned to sessions opened without credentials
pub const ANONYMOUS: &str = "anonymous";

struct StoredItem {
    id: ItemId,
    path: String,
    kind: ItemKind,
    properties: PropertyBag,
    content: Vec<u8>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    items: HashMap<ItemId, StoredItem>,
    by_path: HashMap<String, ItemId>,
    relations: Vec<Relation>,
    /// item id -> holding principal
    locks: HashMap<ItemId, String>,
    /// username -> password
    users: HashMap<String, String>,
    acls: HashMap<ItemId, Vec<AccessEntry>>,
}

/// In-memory reference implementation of `ContentStore`
pub struct MemoryStore {
    inner: RwLock<Inner>,
    root_id: ItemId,
}

impl MemoryStore {
    /// Create a store holding only the root folder
    pub fn new() -> Self {
        let root_id = ItemId::new();
        let now = Utc::now();
        let mut inner = Inner::default();
        inner.items.insert(
            root_id,
            StoredItem {
                id: root_id,
                path: paths::ROOT_PATH.to_string(),
                kind: ItemKind::Folder,
                properties: PropertyBag::new(),
                content: Vec::new(),
                created_at: now,
                modified_at: now,
            },
        );
        inner.by_path.insert(paths::ROOT_PATH.to_string(), root_id);
        Self {
            inner: RwLock::new(inner),
            root_id,
        }
    }

    /// The id of the root folder
    pub fn root_id(&self) -> ItemId {
        self.root_id
    }

    /// Register a credential pair accepted by `open_session`
    pub fn with_user(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.write().users.insert(username.into(), password.into());
        self
    }

    /// Record the native access entries of an item
    pub fn set_access_entries(&self, id: ItemId, entries: Vec<AccessEntry>) {
        self.write().acls.insert(id, entries);
    }

    /// Insert a relation triple directly, bypassing path resolution
    ///
    /// Unlike `add_relation` this accepts nil endpoints, which the mapper
    /// layer is expected to discard.
    pub fn insert_relation_raw(&self, relation: Relation) {
        self.write().relations.push(relation);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn materialize(&self, stored: &StoredItem) -> ContentItem {
        let lock = match self.locks.get(&stored.id) {
            Some(holder) => LockState::Held {
                by: holder.clone(),
            },
            None => LockState::Free,
        };
        ContentItem {
            id: stored.id,
            path: stored.path.clone(),
            kind: stored.kind,
            properties: stored.properties.clone(),
            content_length: stored.content.len() as u64,
            created_at: stored.created_at,
            modified_at: stored.modified_at,
            lock,
        }
    }

    fn get(&self, id: ItemId) -> StoreResult<&StoredItem> {
        self.items.get(&id).ok_or(StoreError::ItemNotFound { id })
    }

    fn get_by_path(&self, path: &str) -> StoreResult<&StoredItem> {
        let id = self.by_path.get(path).ok_or_else(|| StoreError::PathNotFound {
            path: path.to_string(),
        })?;
        self.get(*id)
    }

    /// Ids of an item and its whole subtree
    fn subtree_ids(&self, path: &str) -> Vec<ItemId> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.items
            .values()
            .filter(|s| s.path == path || s.path.starts_with(&prefix))
            .map(|s| s.id)
            .collect()
    }

    fn deep_copy(
        &mut self,
        source_path: &str,
        target_path: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<ItemId> {
        let source = self.get_by_path(source_path)?;
        let copy = StoredItem {
            id: ItemId::new(),
            path: target_path.to_string(),
            kind: source.kind,
            properties: source.properties.clone(),
            content: source.content.clone(),
            created_at: now,
            modified_at: now,
        };
        let copy_id = copy.id;
        let copy_kind = copy.kind;
        self.by_path.insert(copy.path.clone(), copy_id);
        self.items.insert(copy_id, copy);

        if copy_kind == ItemKind::Folder {
            let child_paths: Vec<String> = self
                .items
                .values()
                .filter(|s| s.path != source_path)
                .filter(|s| paths::parent(&s.path).as_deref() == Some(source_path))
                .map(|s| s.path.clone())
                .collect();
            for child_path in child_paths {
                let child_target = paths::join(target_path, paths::name(&child_path));
                self.deep_copy(&child_path, &child_target, now)?;
            }
        }
        Ok(copy_id)
    }
}

impl ContentStore for MemoryStore {
    fn open_session(&self, username: Option<&str>, password: Option<&str>) -> StoreResult<Session> {
        match username {
            None => Ok(Session::new(ANONYMOUS)),
            Some(username) => {
                let inner = self.read();
                let expected = inner.users.get(username);
                if expected.map(String::as_str) == Some(password.unwrap_or("")) {
                    Ok(Session::new(username))
                } else {
                    Err(StoreError::AuthenticationFailed {
                        username: username.to_string(),
                    })
                }
            }
        }
    }

    fn read_item(&self, _session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        let inner = self.read();
        let stored = inner.get(id)?;
        Ok(inner.materialize(stored))
    }

    fn read_item_by_path(&self, _session: &Session, path: &str) -> StoreResult<ContentItem> {
        let inner = self.read();
        let stored = inner.get_by_path(path)?;
        Ok(inner.materialize(stored))
    }

    fn read_parent(&self, _session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        let inner = self.read();
        let stored = inner.get(id)?;
        let parent_path = paths::parent(&stored.path).ok_or_else(|| StoreError::PathNotFound {
            path: stored.path.clone(),
        })?;
        let parent = inner.get_by_path(&parent_path)?;
        Ok(inner.materialize(parent))
    }

    fn list_children(&self, _session: &Session, id: ItemId) -> StoreResult<Vec<ContentItem>> {
        let inner = self.read();
        let folder = inner.get(id)?;
        let mut children: Vec<ContentItem> = inner
            .items
            .values()
            .filter(|s| paths::parent(&s.path).as_deref() == Some(folder.path.as_str()))
            .map(|s| inner.materialize(s))
            .collect();
        children.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(children)
    }

    fn create_item(
        &self,
        session: &Session,
        path: &str,
        kind: ItemKind,
        content: Option<Vec<u8>>,
        properties: PropertyBag,
    ) -> StoreResult<ContentItem> {
        let mut inner = self.write();
        if inner.by_path.contains_key(path) {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        let parent_path = paths::parent(path).ok_or_else(|| StoreError::PathNotFound {
            path: path.to_string(),
        })?;
        let parent = inner.get_by_path(&parent_path)?;
        if parent.kind != ItemKind::Folder {
            return Err(StoreError::Other {
                message: format!("parent is not a folder: {}", parent_path),
            });
        }

        let now = Utc::now();
        let stored = StoredItem {
            id: ItemId::new(),
            path: path.to_string(),
            kind,
            properties,
            content: content.unwrap_or_default(),
            created_at: now,
            modified_at: now,
        };
        let id = stored.id;
        inner.by_path.insert(path.to_string(), id);
        inner.items.insert(id, stored);
        // New items start out locked by their creator
        inner.locks.insert(id, session.principal().to_string());

        let stored = inner.get(id)?;
        Ok(inner.materialize(stored))
    }

    fn copy_item(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
    ) -> StoreResult<ContentItem> {
        let mut inner = self.write();
        if inner.by_path.contains_key(target_path) {
            return Err(StoreError::AlreadyExists {
                path: target_path.to_string(),
            });
        }
        inner.get_by_path(source_path)?;

        let copy_id = inner.deep_copy(source_path, target_path, Utc::now())?;
        inner.locks.insert(copy_id, session.principal().to_string());

        let stored = inner.get(copy_id)?;
        Ok(inner.materialize(stored))
    }

    fn move_item(&self, _session: &Session, source_path: &str, target_path: &str) -> StoreResult<()> {
        let mut inner = self.write();
        if inner.by_path.contains_key(target_path) {
            return Err(StoreError::AlreadyExists {
                path: target_path.to_string(),
            });
        }
        let moved_ids = {
            inner.get_by_path(source_path)?;
            inner.subtree_ids(source_path)
        };

        let prefix = format!("{}/", source_path.trim_end_matches('/'));
        for id in moved_ids {
            let stored = inner.items.get_mut(&id).ok_or(StoreError::ItemNotFound { id })?;
            let old_path = stored.path.clone();
            let new_path = if old_path == source_path {
                target_path.to_string()
            } else {
                format!("{}/{}", target_path.trim_end_matches('/'), &old_path[prefix.len()..])
            };
            stored.path = new_path.clone();
            inner.by_path.remove(&old_path);
            inner.by_path.insert(new_path, id);
        }
        Ok(())
    }

    fn delete_item(&self, _session: &Session, path: &str) -> StoreResult<()> {
        let mut inner = self.write();
        inner.get_by_path(path)?;
        let removed = inner.subtree_ids(path);
        for id in &removed {
            if let Some(stored) = inner.items.remove(id) {
                inner.by_path.remove(&stored.path);
            }
            inner.locks.remove(id);
            inner.acls.remove(id);
        }
        inner
            .relations
            .retain(|r| !removed.contains(&r.source_id) && !removed.contains(&r.target_id));
        Ok(())
    }

    fn write_properties(
        &self,
        _session: &Session,
        id: ItemId,
        properties: PropertyBag,
    ) -> StoreResult<()> {
        let mut inner = self.write();
        let stored = inner.items.get_mut(&id).ok_or(StoreError::ItemNotFound { id })?;
        stored.properties.extend(properties);
        stored.modified_at = Utc::now();
        Ok(())
    }

    fn read_content(&self, _session: &Session, id: ItemId) -> StoreResult<Vec<u8>> {
        let inner = self.read();
        Ok(inner.get(id)?.content.clone())
    }

    fn write_content(&self, _session: &Session, id: ItemId, content: Vec<u8>) -> StoreResult<()> {
        let mut inner = self.write();
        let stored = inner.items.get_mut(&id).ok_or(StoreError::ItemNotFound { id })?;
        stored.content = content;
        stored.modified_at = Utc::now();
        Ok(())
    }

    fn restamp_modified(
        &self,
        _session: &Session,
        id: ItemId,
        modified_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.write();
        let stored = inner.items.get_mut(&id).ok_or(StoreError::ItemNotFound { id })?;
        stored.modified_at = modified_at;
        Ok(())
    }

    fn read_access_entries(&self, _session: &Session, id: ItemId) -> StoreResult<Vec<AccessEntry>> {
        let inner = self.read();
        inner.get(id)?;
        Ok(inner.acls.get(&id).cloned().unwrap_or_default())
    }

    fn try_lock(&self, session: &Session, id: ItemId) -> StoreResult<bool> {
        let mut inner = self.write();
        inner.get(id)?;
        match inner.locks.get(&id) {
            None => {
                inner.locks.insert(id, session.principal().to_string());
                Ok(true)
            }
            Some(holder) if holder == session.principal() => Ok(false),
            Some(holder) => Err(StoreError::LockContention {
                id,
                held_by: holder.clone(),
            }),
        }
    }

    fn unlock(&self, session: &Session, id: ItemId) -> StoreResult<()> {
        let mut inner = self.write();
        match inner.locks.get(&id) {
            Some(holder) if holder != session.principal() => Err(StoreError::LockContention {
                id,
                held_by: holder.clone(),
            }),
            // No-op when free, or when the item is already gone
            _ => {
                inner.locks.remove(&id);
                Ok(())
            }
        }
    }

    fn relations_of(
        &self,
        _session: &Session,
        id: ItemId,
        direction: RelationDirection,
    ) -> StoreResult<Vec<Relation>> {
        let inner = self.read();
        Ok(inner
            .relations
            .iter()
            .filter(|r| match direction {
                RelationDirection::Outgoing => r.source_id == id,
                RelationDirection::Incoming => r.target_id == id,
                RelationDirection::Either => r.source_id == id || r.target_id == id,
            })
            .cloned()
            .collect())
    }

    fn add_relation(
        &self,
        _session: &Session,
        source_path: &str,
        target_path: &str,
        type_name: &str,
    ) -> StoreResult<()> {
        let mut inner = self.write();
        let relation = Relation {
            source_id: inner.get_by_path(source_path)?.id,
            target_id: inner.get_by_path(target_path)?.id,
            type_name: type_name.to_string(),
        };
        if !inner.relations.contains(&relation) {
            inner.relations.push(relation);
        }
        Ok(())
    }

    // Names cannot carry path separators, so every resolvable name is a
    // document here; folders are only created through the folder path.
    fn default_kind_for_name(&self, _name: &str) -> ItemKind {
        ItemKind::Document
    }
}
