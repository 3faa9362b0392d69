//! Arbor Core - hierarchical content repository facade
//!
//! This crate translates between a hierarchical backing store (folders,
//! documents, typed inter-item relationships) and a protocol-agnostic
//! object-access surface. It provides:
//! - Identifier resolution for plain items and synthesized relationship ids
//! - Object mappers that build protocol-facing representations
//! - One-level listing and recursive descendant traversal with pagination
//! - A mutation pipeline with strict lock acquire/release discipline
//! - A static permission/capability table and a read-only mode gate
//!
//! The backing store, type schema, and query execution are trait seams
//! (`ContentStore`, `TypeProvider`, `QueryEngine`); wire-level protocol
//! bindings sit on top of the `Repository` facade.

pub mod errors;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod ops;
pub mod paging;
pub mod paths;
pub mod permissions;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod walker;

// Re-export commonly used types
pub use errors::{ErrorKind, RepoError, Result};
pub use mapper::{split_filter, MapEnv, MapFlags, ObjectSink};
pub use model::{
    AccessBits, AccessEntry, AclEntry, AllowableAction, BaseKind, ContentItem, ContentStreamData,
    ContentStreamInfo, DeleteTreeResult, ItemKind, LockState, ObjectInFolder, ObjectRepr, ParentData,
    PermissionLevel, PropertyBag, PropertyValue, Relation, RelationDirection, RelationshipId,
    TreeNode,
};
pub use paging::{window, Page};
pub use permissions::{required_permission, GatedAction, PermissionDefinition};
pub use query::QueryEngine;
pub use repository::{
    PermissionMapping, Repository, RepositoryCapabilities, RepositoryConfig, RepositoryInfo,
};
pub use resolver::ObjectRef;
pub use schema::{StaticTypeRegistry, TypeDefinition, TypeNode, TypeProvider};
pub use store::{ContentStore, Session, StoreError, StoreResult};
