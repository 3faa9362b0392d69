//! Repository facade
//!
//! Top-level entry points over the backing store. Every call carries a
//! `CallContext`; credentials are turned into a fresh store session per
//! call and never cached. Single-object operations classify the external
//! id once, at the resolver boundary, and match on the result. The
//! read-only gate runs before any mutation touches the store; flipping the
//! mode is the only repository-wide mutable state and sits behind its own
//! lock.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use arbor_core_types::{CallContext, ItemId};

use crate::errors::{RepoError, Result};
use crate::mapper::item::mime_type_of;
use crate::mapper::{map_item, map_relationship, relations_of, split_filter, MapEnv, MapFlags, ObjectSink};
use crate::model::acl::collapse;
use crate::model::actions::allowable_actions;
use crate::model::{
    AclEntry, AllowableAction, ContentItem, ContentStreamData, DeleteTreeResult, ObjectInFolder,
    ObjectRepr, ParentData, PermissionLevel, PropertyBag, Relation, RelationDirection,
    RelationshipId, TreeNode,
};
use crate::ops;
use crate::paging::{window, Page};
use crate::permissions::{PermissionDefinition, PERMISSION_DEFINITIONS, PERMISSION_MAPPINGS};
use crate::query::QueryEngine;
use crate::resolver::{require_item, ObjectRef};
use crate::schema::{StaticTypeRegistry, TypeDefinition, TypeNode, TypeProvider};
use crate::store::{ContentStore, Session};

/// Static configuration of a repository instance
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Stable repository identifier
    pub id: String,
    /// Human-readable description
    pub description: String,
    /// Id of the root folder in the backing store
    pub root_id: ItemId,
    /// Whether the repository starts in read-only mode
    pub read_only: bool,
}

/// Optional-capability flags surfaced in repository metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepositoryCapabilities {
    pub get_descendants: bool,
    pub get_folder_tree: bool,
    pub multifiling: bool,
    pub versioning: bool,
    pub query: bool,
    pub relationships: bool,
}

/// One action-to-permission binding as surfaced in repository metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionMapping {
    pub key: &'static str,
    pub permission: PermissionLevel,
}

/// Repository capability and permission metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInfo {
    pub id: String,
    pub description: String,
    pub vendor_name: String,
    pub product_name: String,
    pub product_version: String,
    pub root_folder_id: String,
    pub read_only: bool,
    pub capabilities: RepositoryCapabilities,
    pub permissions: Vec<PermissionDefinition>,
    pub permission_mappings: Vec<PermissionMapping>,
}

/// The protocol-agnostic object-access facade
pub struct Repository {
    store: Arc<dyn ContentStore>,
    types: Arc<dyn TypeProvider>,
    query_engine: Option<Arc<dyn QueryEngine>>,
    sink: Option<Arc<dyn ObjectSink>>,
    id: String,
    description: String,
    root_id: ItemId,
    read_only: RwLock<bool>,
}

impl Repository {
    /// Build a repository over a backing store
    pub fn new(store: Arc<dyn ContentStore>, config: RepositoryConfig) -> Self {
        Self {
            store,
            types: Arc::new(StaticTypeRegistry::new()),
            query_engine: None,
            sink: None,
            id: config.id,
            description: config.description,
            root_id: config.root_id,
            read_only: RwLock::new(config.read_only),
        }
    }

    /// Replace the built-in type provider
    pub fn with_type_provider(mut self, types: Arc<dyn TypeProvider>) -> Self {
        self.types = types;
        self
    }

    /// Attach a query engine; without one, queries are unsupported
    pub fn with_query_engine(mut self, engine: Arc<dyn QueryEngine>) -> Self {
        self.query_engine = Some(engine);
        self
    }

    /// Attach a response-shaping object sink
    pub fn with_object_sink(mut self, sink: Arc<dyn ObjectSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The root folder id
    pub fn root_id(&self) -> ItemId {
        self.root_id
    }

    /// Whether the repository is in read-only mode
    pub fn read_only(&self) -> bool {
        *self.read_only.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Flip read-only mode
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.write().unwrap_or_else(|e| e.into_inner()) = read_only;
    }

    fn check_write_access(&self) -> Result<()> {
        if self.read_only() {
            return Err(RepoError::NotSupported {
                reason: "repository is read-only".to_string(),
            });
        }
        Ok(())
    }

    fn session(&self, ctx: &CallContext) -> Result<Session> {
        Ok(self.store.open_session(ctx.username(), ctx.password())?)
    }

    fn env<'a>(&'a self, session: &'a Session, ctx: &CallContext) -> MapEnv<'a> {
        MapEnv {
            store: &*self.store,
            session,
            read_only: self.read_only(),
            root_id: self.root_id,
            sink: self.sink.as_deref(),
            register_objects: ctx.object_info_required(),
        }
    }

    /// Resolve a relationship id back to its anchor item and relation
    fn resolve_relationship(
        &self,
        session: &Session,
        rel_id: &RelationshipId,
    ) -> Result<(ContentItem, Relation)> {
        let anchor = self.store.read_item(session, rel_id.source_id)?;
        let relations = relations_of(&*self.store, session, anchor.id, RelationDirection::Outgoing)?;
        let relation = relations
            .into_iter()
            .find(|r| rel_id.matches(r))
            .ok_or_else(|| RepoError::NotFound {
                object: rel_id.to_string(),
            })?;
        Ok((anchor, relation))
    }

    // --- repository metadata -------------------------------------------

    /// Capability and permission metadata for this repository
    pub fn repository_info(&self) -> RepositoryInfo {
        RepositoryInfo {
            id: self.id.clone(),
            description: self.description.clone(),
            vendor_name: "Arbor".to_string(),
            product_name: "Arbor Repository".to_string(),
            product_version: env!("CARGO_PKG_VERSION").to_string(),
            root_folder_id: self.root_id.to_string(),
            read_only: self.read_only(),
            capabilities: RepositoryCapabilities {
                get_descendants: true,
                get_folder_tree: true,
                multifiling: false,
                versioning: false,
                query: self.query_engine.is_some(),
                relationships: true,
            },
            permissions: PERMISSION_DEFINITIONS.to_vec(),
            permission_mappings: PERMISSION_MAPPINGS
                .iter()
                .map(|(action, permission)| PermissionMapping {
                    key: action.key(),
                    permission: *permission,
                })
                .collect(),
        }
    }

    // --- single-object reads -------------------------------------------

    /// Fetch an object (item or relationship) by external id
    pub fn get_object(
        &self,
        ctx: &CallContext,
        id: &str,
        filter: Option<&str>,
        flags: MapFlags,
    ) -> Result<ObjectRepr> {
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);
        let names = split_filter(filter);

        match ObjectRef::classify(id)? {
            ObjectRef::Item(item_id) => {
                let item = self.store.read_item(&session, item_id)?;
                map_item(&env, &item, names.as_ref(), flags)
            }
            ObjectRef::Relationship(rel_id) => {
                let (anchor, relation) = self.resolve_relationship(&session, &rel_id)?;
                Ok(map_relationship(&env, &anchor, &relation, names.as_ref(), flags))
            }
        }
    }

    /// Fetch an object by absolute path
    pub fn get_object_by_path(
        &self,
        ctx: &CallContext,
        path: &str,
        filter: Option<&str>,
        flags: MapFlags,
    ) -> Result<ObjectRepr> {
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);
        let item = self.store.read_item_by_path(&session, path)?;
        map_item(&env, &item, split_filter(filter).as_ref(), flags)
    }

    /// Fetch just the filtered property bag of an object
    pub fn get_properties(
        &self,
        ctx: &CallContext,
        id: &str,
        filter: Option<&str>,
    ) -> Result<PropertyBag> {
        self.get_object(ctx, id, filter, MapFlags::default())
            .map(|object| object.properties)
    }

    /// Fetch the coarse ACL of an object
    pub fn get_acl(&self, ctx: &CallContext, id: &str) -> Result<Vec<AclEntry>> {
        let session = self.session(ctx)?;
        match ObjectRef::classify(id)? {
            ObjectRef::Item(item_id) => {
                let entries = self.store.read_access_entries(&session, item_id)?;
                Ok(entries.iter().map(collapse).collect())
            }
            ObjectRef::Relationship(rel_id) => {
                self.resolve_relationship(&session, &rel_id)?;
                Ok(Vec::new())
            }
        }
    }

    /// Compute the allowable actions on an object
    pub fn get_allowable_actions(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<BTreeSet<AllowableAction>> {
        let session = self.session(ctx)?;
        match ObjectRef::classify(id)? {
            ObjectRef::Item(item_id) => {
                let item = self.store.read_item(&session, item_id)?;
                Ok(allowable_actions(
                    item.kind,
                    self.read_only(),
                    item.id == self.root_id,
                ))
            }
            ObjectRef::Relationship(rel_id) => {
                self.resolve_relationship(&session, &rel_id)?;
                let mut actions = BTreeSet::new();
                actions.insert(AllowableAction::GetProperties);
                actions.insert(AllowableAction::GetAcl);
                Ok(actions)
            }
        }
    }

    // --- traversal ------------------------------------------------------

    /// List one level of a folder's children, windowed
    #[allow(clippy::too_many_arguments)]
    pub fn get_children(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        filter: Option<&str>,
        flags: MapFlags,
        max_items: Option<i64>,
        skip_count: Option<i64>,
        include_path_segments: bool,
    ) -> Result<Page<ObjectInFolder>> {
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);
        crate::walker::list_children(
            &env,
            folder_id,
            split_filter(filter).as_ref(),
            flags,
            max_items,
            skip_count,
            include_path_segments,
        )
    }

    /// Walk the subtree below a folder; an absent depth defaults to 2
    #[allow(clippy::too_many_arguments)]
    pub fn get_descendants(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        depth: Option<i32>,
        filter: Option<&str>,
        flags: MapFlags,
        include_path_segments: bool,
    ) -> Result<Vec<TreeNode>> {
        self.descend(ctx, folder_id, depth, filter, flags, false, include_path_segments)
    }

    /// Walk the subtree below a folder, omitting documents at every level
    #[allow(clippy::too_many_arguments)]
    pub fn get_folder_tree(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        depth: Option<i32>,
        filter: Option<&str>,
        flags: MapFlags,
        include_path_segments: bool,
    ) -> Result<Vec<TreeNode>> {
        self.descend(ctx, folder_id, depth, filter, flags, true, include_path_segments)
    }

    #[allow(clippy::too_many_arguments)]
    fn descend(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        depth: Option<i32>,
        filter: Option<&str>,
        flags: MapFlags,
        folders_only: bool,
        include_path_segments: bool,
    ) -> Result<Vec<TreeNode>> {
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);
        crate::walker::list_descendants(
            &env,
            folder_id,
            depth.unwrap_or(2),
            split_filter(filter).as_ref(),
            flags,
            folders_only,
            include_path_segments,
        )
    }

    /// Fetch a folder's parent folder; the root has none
    pub fn get_folder_parent(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        filter: Option<&str>,
        flags: MapFlags,
    ) -> Result<ObjectRepr> {
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);

        let folder = self.store.read_item(&session, folder_id)?;
        if !folder.is_folder() {
            return Err(RepoError::InvalidArgument {
                reason: format!("not a folder: {}", folder.path),
            });
        }
        if folder.id == self.root_id {
            return Err(RepoError::InvalidArgument {
                reason: "the root folder has no parent".to_string(),
            });
        }
        let parent = self.store.read_parent(&session, folder.id)?;
        map_item(&env, &parent, split_filter(filter).as_ref(), flags)
    }

    /// Fetch an item's parents; empty for the root
    pub fn get_object_parents(
        &self,
        ctx: &CallContext,
        id: &str,
        filter: Option<&str>,
        flags: MapFlags,
        include_relative_path_segment: bool,
    ) -> Result<Vec<ParentData>> {
        let item_id = require_item(id)?;
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);

        let item = self.store.read_item(&session, item_id)?;
        if item.id == self.root_id {
            return Ok(Vec::new());
        }
        let parent = self.store.read_parent(&session, item.id)?;
        let object = map_item(&env, &parent, split_filter(filter).as_ref(), flags)?;
        Ok(vec![ParentData {
            object,
            relative_path_segment: include_relative_path_segment.then(|| item.name().to_string()),
        }])
    }

    // --- relationships --------------------------------------------------

    /// List the relationships anchored at an item, windowed
    #[allow(clippy::too_many_arguments)]
    pub fn get_object_relationships(
        &self,
        ctx: &CallContext,
        id: &str,
        direction: RelationDirection,
        filter: Option<&str>,
        flags: MapFlags,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<ObjectRepr>> {
        let item_id = require_item(id)?;
        let session = self.session(ctx)?;
        let env = self.env(&session, ctx);
        let names = split_filter(filter);

        let anchor = self.store.read_item(&session, item_id)?;
        let relations = relations_of(&*self.store, &session, anchor.id, direction)?;
        let page = window(relations, max_items, skip_count);

        let objects = page
            .items
            .iter()
            .map(|relation| map_relationship(&env, &anchor, relation, names.as_ref(), flags))
            .collect();
        Ok(Page {
            items: objects,
            num_items: page.num_items,
            has_more: page.has_more,
        })
    }

    // --- content --------------------------------------------------------

    /// Read a document's whole content stream
    ///
    /// Byte-range parameters are accepted syntactically but any non-null
    /// value is rejected; range reads are unsupported.
    pub fn get_content_stream(
        &self,
        ctx: &CallContext,
        id: &str,
        offset: Option<i64>,
        length: Option<i64>,
    ) -> Result<ContentStreamData> {
        if offset.is_some() || length.is_some() {
            return Err(RepoError::InvalidArgument {
                reason: "byte-range content retrieval is not supported".to_string(),
            });
        }
        let item_id = require_item(id)?;
        let session = self.session(ctx)?;

        let item = self.store.read_item(&session, item_id)?;
        if item.is_folder() {
            return Err(RepoError::StreamNotSupported { object: item.path });
        }
        let bytes = self.store.read_content(&session, item.id)?;
        Ok(ContentStreamData {
            file_name: item.name().to_string(),
            mime_type: mime_type_of(&item.path),
            bytes,
        })
    }

    /// Versioning is unsupported; the checked-out set is always empty
    pub fn get_checked_out_docs(
        &self,
        ctx: &CallContext,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<ObjectRepr>> {
        self.session(ctx)?;
        Ok(window(Vec::new(), max_items, skip_count))
    }

    // --- query and types ------------------------------------------------

    /// Execute a query through the injected engine
    pub fn query(
        &self,
        ctx: &CallContext,
        statement: &str,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<ObjectRepr>> {
        let engine = self
            .query_engine
            .as_ref()
            .ok_or_else(|| RepoError::NotSupported {
                reason: "no query engine is configured".to_string(),
            })?;
        let session = self.session(ctx)?;
        engine.query(&session, statement, max_items, skip_count)
    }

    pub fn type_definition(&self, type_id: &str) -> Result<TypeDefinition> {
        self.types.type_definition(type_id)
    }

    pub fn type_children(
        &self,
        type_id: Option<&str>,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<TypeDefinition>> {
        self.types.type_children(type_id, max_items, skip_count)
    }

    pub fn type_descendants(&self, type_id: Option<&str>, depth: i32) -> Result<Vec<TypeNode>> {
        self.types.type_descendants(type_id, depth)
    }

    // --- mutations ------------------------------------------------------

    /// Create a document in a folder and return its external id
    #[allow(clippy::too_many_arguments)]
    pub fn create_document(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        properties: &PropertyBag,
        content: Option<ContentStreamData>,
        add_aces: Option<&[AclEntry]>,
        remove_aces: Option<&[AclEntry]>,
    ) -> Result<String> {
        self.check_write_access()?;
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let id = ops::create::create_document(
            &*self.store,
            &session,
            folder_id,
            properties,
            content,
            add_aces,
            remove_aces,
        )?;
        Ok(id.to_string())
    }

    /// Create a folder and return its external id
    pub fn create_folder(
        &self,
        ctx: &CallContext,
        folder_id: &str,
        properties: &PropertyBag,
        add_aces: Option<&[AclEntry]>,
        remove_aces: Option<&[AclEntry]>,
    ) -> Result<String> {
        self.check_write_access()?;
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let id = ops::create::create_folder(
            &*self.store,
            &session,
            folder_id,
            properties,
            add_aces,
            remove_aces,
        )?;
        Ok(id.to_string())
    }

    /// Copy an existing document into a folder and return the copy's id
    #[allow(clippy::too_many_arguments)]
    pub fn create_document_from_source(
        &self,
        ctx: &CallContext,
        source_id: &str,
        folder_id: &str,
        properties: &PropertyBag,
        add_aces: Option<&[AclEntry]>,
        remove_aces: Option<&[AclEntry]>,
    ) -> Result<String> {
        self.check_write_access()?;
        let source_id = require_item(source_id)?;
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        let id = ops::create::copy_document(
            &*self.store,
            &session,
            source_id,
            folder_id,
            properties,
            add_aces,
            remove_aces,
        )?;
        Ok(id.to_string())
    }

    /// Create a typed relationship and return its synthesized id
    pub fn create_relationship(
        &self,
        ctx: &CallContext,
        properties: &PropertyBag,
        add_aces: Option<&[AclEntry]>,
        remove_aces: Option<&[AclEntry]>,
    ) -> Result<String> {
        self.check_write_access()?;
        let session = self.session(ctx)?;
        ops::create::create_relationship(&*self.store, &session, properties, add_aces, remove_aces)
    }

    /// Move an item into another folder
    pub fn move_object(&self, ctx: &CallContext, id: &str, target_folder_id: &str) -> Result<()> {
        self.check_write_access()?;
        let item_id = require_item(id)?;
        let target_folder_id = require_item(target_folder_id)?;
        let session = self.session(ctx)?;
        ops::update::move_object(&*self.store, &session, item_id, target_folder_id)
    }

    /// Update an item's properties; a changed name property renames it
    pub fn update_properties(
        &self,
        ctx: &CallContext,
        id: &str,
        properties: &PropertyBag,
    ) -> Result<()> {
        self.check_write_access()?;
        let item_id = require_item(id)?;
        let session = self.session(ctx)?;
        ops::update::update_properties(&*self.store, &session, item_id, properties)
    }

    /// Replace a document's content bytes
    pub fn set_content_stream(
        &self,
        ctx: &CallContext,
        id: &str,
        content: ContentStreamData,
        overwrite: Option<bool>,
    ) -> Result<()> {
        self.check_write_access()?;
        let item_id = require_item(id)?;
        let session = self.session(ctx)?;
        ops::content::set_content_stream(&*self.store, &session, item_id, content, overwrite)
    }

    /// Content-stream deletion is not exposed
    pub fn delete_content_stream(&self, ctx: &CallContext, _id: &str) -> Result<()> {
        self.check_write_access()?;
        self.session(ctx)?;
        ops::content::delete_content_stream()
    }

    /// Delete a single object
    pub fn delete_object(&self, ctx: &CallContext, id: &str) -> Result<()> {
        self.check_write_access()?;
        match ObjectRef::classify(id)? {
            ObjectRef::Item(item_id) => {
                let session = self.session(ctx)?;
                ops::delete::delete_object(&*self.store, &session, item_id)
            }
            ObjectRef::Relationship(_) => Err(RepoError::NotSupported {
                reason: "relationship deletion is not supported".to_string(),
            }),
        }
    }

    /// Delete a folder and its whole subtree
    pub fn delete_tree(&self, ctx: &CallContext, folder_id: &str) -> Result<DeleteTreeResult> {
        self.check_write_access()?;
        let folder_id = require_item(folder_id)?;
        let session = self.session(ctx)?;
        ops::delete::delete_tree(&*self.store, &session, folder_id)
    }
}
