//! Shared helpers for the facade integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use arbor_core::model::{
    AccessEntry, AclEntry, ContentItem, ContentStreamData, ItemKind, PropertyBag, PropertyValue,
    Relation, RelationDirection,
};
use arbor_core::store::{ContentStore, Session, StoreResult};
use arbor_core::{Repository, RepositoryConfig};
use arbor_core_types::schema::PROP_NAME;
use arbor_core_types::{CallContext, ItemId};
use arbor_store::MemoryStore;

pub fn ctx() -> CallContext {
    CallContext::new()
}

pub fn repo_config(root_id: ItemId) -> RepositoryConfig {
    RepositoryConfig {
        id: "test-repo".to_string(),
        description: "Test repository".to_string(),
        root_id,
        read_only: false,
    }
}

/// A fresh repository over a fresh in-memory store
pub fn repo_with_store() -> (Arc<MemoryStore>, Repository) {
    let store = Arc::new(MemoryStore::new());
    let repo = Repository::new(store.clone(), repo_config(store.root_id()));
    (store, repo)
}

pub fn name_props(name: &str) -> PropertyBag {
    let mut bag = PropertyBag::new();
    bag.insert(PROP_NAME.to_string(), PropertyValue::from(name));
    bag
}

pub fn text_content(bytes: &[u8]) -> ContentStreamData {
    ContentStreamData {
        file_name: "upload.txt".to_string(),
        mime_type: "text/plain".to_string(),
        bytes: bytes.to_vec(),
    }
}

/// Create a document under a folder and return its external id
pub fn create_doc(repo: &Repository, folder_id: &str, name: &str, bytes: &[u8]) -> String {
    repo.create_document(
        &ctx(),
        folder_id,
        &name_props(name),
        Some(text_content(bytes)),
        None,
        None,
    )
    .unwrap()
}

/// Create a folder and return its external id
pub fn create_folder(repo: &Repository, parent_id: &str, name: &str) -> String {
    repo.create_folder(&ctx(), parent_id, &name_props(name), None, None)
        .unwrap()
}

/// Store wrapper counting every mutating backend call
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn root_id(&self) -> ItemId {
        self.inner.root_id()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl ContentStore for CountingStore {
    fn open_session(&self, username: Option<&str>, password: Option<&str>) -> StoreResult<Session> {
        self.inner.open_session(username, password)
    }

    fn read_item(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        self.inner.read_item(session, id)
    }

    fn read_item_by_path(&self, session: &Session, path: &str) -> StoreResult<ContentItem> {
        self.inner.read_item_by_path(session, path)
    }

    fn read_parent(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        self.inner.read_parent(session, id)
    }

    fn list_children(&self, session: &Session, id: ItemId) -> StoreResult<Vec<ContentItem>> {
        self.inner.list_children(session, id)
    }

    fn create_item(
        &self,
        session: &Session,
        path: &str,
        kind: ItemKind,
        content: Option<Vec<u8>>,
        properties: PropertyBag,
    ) -> StoreResult<ContentItem> {
        self.count();
        self.inner.create_item(session, path, kind, content, properties)
    }

    fn copy_item(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
    ) -> StoreResult<ContentItem> {
        self.count();
        self.inner.copy_item(session, source_path, target_path)
    }

    fn move_item(&self, session: &Session, source_path: &str, target_path: &str) -> StoreResult<()> {
        self.count();
        self.inner.move_item(session, source_path, target_path)
    }

    fn delete_item(&self, session: &Session, path: &str) -> StoreResult<()> {
        self.count();
        self.inner.delete_item(session, path)
    }

    fn write_properties(
        &self,
        session: &Session,
        id: ItemId,
        properties: PropertyBag,
    ) -> StoreResult<()> {
        self.count();
        self.inner.write_properties(session, id, properties)
    }

    fn read_content(&self, session: &Session, id: ItemId) -> StoreResult<Vec<u8>> {
        self.inner.read_content(session, id)
    }

    fn write_content(&self, session: &Session, id: ItemId, content: Vec<u8>) -> StoreResult<()> {
        self.count();
        self.inner.write_content(session, id, content)
    }

    fn restamp_modified(
        &self,
        session: &Session,
        id: ItemId,
        modified_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.count();
        self.inner.restamp_modified(session, id, modified_at)
    }

    fn read_access_entries(&self, session: &Session, id: ItemId) -> StoreResult<Vec<AccessEntry>> {
        self.inner.read_access_entries(session, id)
    }

    fn try_lock(&self, session: &Session, id: ItemId) -> StoreResult<bool> {
        self.inner.try_lock(session, id)
    }

    fn unlock(&self, session: &Session, id: ItemId) -> StoreResult<()> {
        self.inner.unlock(session, id)
    }

    fn relations_of(
        &self,
        session: &Session,
        id: ItemId,
        direction: RelationDirection,
    ) -> StoreResult<Vec<Relation>> {
        self.inner.relations_of(session, id, direction)
    }

    fn add_relation(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
        type_name: &str,
    ) -> StoreResult<()> {
        self.count();
        self.inner.add_relation(session, source_path, target_path, type_name)
    }

    fn default_kind_for_name(&self, name: &str) -> ItemKind {
        self.inner.default_kind_for_name(name)
    }
}

/// Store wrapper that fails selected mutations after any lock bookkeeping
pub struct FailingStore {
    inner: MemoryStore,
    pub fail_write_content: AtomicBool,
    pub fail_move: AtomicBool,
    pub fail_delete: AtomicBool,
    pub resolve_names_to_folders: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_write_content: AtomicBool::new(false),
            fail_move: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            resolve_names_to_folders: AtomicBool::new(false),
        }
    }

    pub fn root_id(&self) -> ItemId {
        self.inner.root_id()
    }

    pub fn store(&self) -> &MemoryStore {
        &self.inner
    }

    fn forced_failure() -> arbor_core::StoreError {
        arbor_core::StoreError::Other {
            message: "forced failure".to_string(),
        }
    }
}

impl ContentStore for FailingStore {
    fn open_session(&self, username: Option<&str>, password: Option<&str>) -> StoreResult<Session> {
        self.inner.open_session(username, password)
    }

    fn read_item(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        self.inner.read_item(session, id)
    }

    fn read_item_by_path(&self, session: &Session, path: &str) -> StoreResult<ContentItem> {
        self.inner.read_item_by_path(session, path)
    }

    fn read_parent(&self, session: &Session, id: ItemId) -> StoreResult<ContentItem> {
        self.inner.read_parent(session, id)
    }

    fn list_children(&self, session: &Session, id: ItemId) -> StoreResult<Vec<ContentItem>> {
        self.inner.list_children(session, id)
    }

    fn create_item(
        &self,
        session: &Session,
        path: &str,
        kind: ItemKind,
        content: Option<Vec<u8>>,
        properties: PropertyBag,
    ) -> StoreResult<ContentItem> {
        self.inner.create_item(session, path, kind, content, properties)
    }

    fn copy_item(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
    ) -> StoreResult<ContentItem> {
        self.inner.copy_item(session, source_path, target_path)
    }

    fn move_item(&self, session: &Session, source_path: &str, target_path: &str) -> StoreResult<()> {
        if self.fail_move.load(Ordering::SeqCst) {
            return Err(Self::forced_failure());
        }
        self.inner.move_item(session, source_path, target_path)
    }

    fn delete_item(&self, session: &Session, path: &str) -> StoreResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::forced_failure());
        }
        self.inner.delete_item(session, path)
    }

    fn write_properties(
        &self,
        session: &Session,
        id: ItemId,
        properties: PropertyBag,
    ) -> StoreResult<()> {
        self.inner.write_properties(session, id, properties)
    }

    fn read_content(&self, session: &Session, id: ItemId) -> StoreResult<Vec<u8>> {
        self.inner.read_content(session, id)
    }

    fn write_content(&self, session: &Session, id: ItemId, content: Vec<u8>) -> StoreResult<()> {
        if self.fail_write_content.load(Ordering::SeqCst) {
            return Err(Self::forced_failure());
        }
        self.inner.write_content(session, id, content)
    }

    fn restamp_modified(
        &self,
        session: &Session,
        id: ItemId,
        modified_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.inner.restamp_modified(session, id, modified_at)
    }

    fn read_access_entries(&self, session: &Session, id: ItemId) -> StoreResult<Vec<AccessEntry>> {
        self.inner.read_access_entries(session, id)
    }

    fn try_lock(&self, session: &Session, id: ItemId) -> StoreResult<bool> {
        self.inner.try_lock(session, id)
    }

    fn unlock(&self, session: &Session, id: ItemId) -> StoreResult<()> {
        self.inner.unlock(session, id)
    }

    fn relations_of(
        &self,
        session: &Session,
        id: ItemId,
        direction: RelationDirection,
    ) -> StoreResult<Vec<Relation>> {
        self.inner.relations_of(session, id, direction)
    }

    fn add_relation(
        &self,
        session: &Session,
        source_path: &str,
        target_path: &str,
        type_name: &str,
    ) -> StoreResult<()> {
        self.inner.add_relation(session, source_path, target_path, type_name)
    }

    fn default_kind_for_name(&self, name: &str) -> ItemKind {
        if self.resolve_names_to_folders.load(Ordering::SeqCst) {
            return ItemKind::Folder;
        }
        self.inner.default_kind_for_name(name)
    }
}

/// Acl helper for tests that pass explicit ACEs
pub fn some_aces() -> Vec<AclEntry> {
    vec![AclEntry {
        principal: "alice".to_string(),
        permission: arbor_core::PermissionLevel::Read,
    }]
}
