//! Type-schema provider seam
//!
//! The repository exposes a small type hierarchy (folder, document,
//! relationship) whose definitions come from a `TypeProvider`. Type children
//! are paged with the same windowing primitive as object listings, and type
//! descendants follow the same depth rules as the tree walker: zero is
//! invalid, negative means unlimited.

use serde::{Deserialize, Serialize};

use arbor_core_types::schema::{TYPE_DOCUMENT, TYPE_FOLDER, TYPE_RELATIONSHIP};

use crate::errors::{RepoError, Result};
use crate::model::BaseKind;
use crate::paging::{window, Page};

/// Definition of an object type exposed by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Namespaced type id
    pub id: String,
    /// Parent type id; `None` for a base type
    pub parent_id: Option<String>,
    /// Base kind this type descends from
    pub base_kind: BaseKind,
    pub display_name: String,
    pub description: String,
    /// Whether objects of this type can be created through the facade
    pub creatable: bool,
    /// Whether objects of this type live in the folder hierarchy
    pub fileable: bool,
}

/// A node of a type-descendant tree; children follow the same
/// absent-vs-empty convention as object tree nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub definition: TypeDefinition,
    pub children: Option<Vec<TypeNode>>,
}

/// The type-schema capability the repository consumes
pub trait TypeProvider: Send + Sync {
    /// Look up a type definition by id
    fn type_definition(&self, type_id: &str) -> Result<TypeDefinition>;

    /// List direct child types, or base types when `type_id` is `None`
    fn type_children(
        &self,
        type_id: Option<&str>,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<TypeDefinition>>;

    /// Walk the type hierarchy below a type, or below the base types when
    /// `type_id` is `None`; depth zero is invalid, negative is unlimited
    fn type_descendants(&self, type_id: Option<&str>, depth: i32) -> Result<Vec<TypeNode>>;
}

/// Built-in provider carrying exactly the three base types
///
/// The hierarchy is flat: folder, document, and relationship, none with
/// subtypes. A schema-backed provider would replace this behind the same
/// trait.
#[derive(Debug, Default)]
pub struct StaticTypeRegistry;

impl StaticTypeRegistry {
    pub fn new() -> Self {
        Self
    }

    fn base_types() -> Vec<TypeDefinition> {
        vec![
            TypeDefinition {
                id: TYPE_FOLDER.to_string(),
                parent_id: None,
                base_kind: BaseKind::Folder,
                display_name: "Folder".to_string(),
                description: "Folder in the content hierarchy".to_string(),
                creatable: true,
                fileable: true,
            },
            TypeDefinition {
                id: TYPE_DOCUMENT.to_string(),
                parent_id: None,
                base_kind: BaseKind::Document,
                display_name: "Document".to_string(),
                description: "Document carrying a content stream".to_string(),
                creatable: true,
                fileable: true,
            },
            TypeDefinition {
                id: TYPE_RELATIONSHIP.to_string(),
                parent_id: None,
                base_kind: BaseKind::Relationship,
                display_name: "Relationship".to_string(),
                description: "Typed link between two content items".to_string(),
                creatable: true,
                fileable: false,
            },
        ]
    }
}

impl TypeProvider for StaticTypeRegistry {
    fn type_definition(&self, type_id: &str) -> Result<TypeDefinition> {
        Self::base_types()
            .into_iter()
            .find(|t| t.id == type_id)
            .ok_or_else(|| RepoError::NotFound {
                object: type_id.to_string(),
            })
    }

    fn type_children(
        &self,
        type_id: Option<&str>,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<TypeDefinition>> {
        let children = match type_id {
            None => Self::base_types(),
            Some(id) => {
                // Base types have no subtypes; unknown ids are still errors
                self.type_definition(id)?;
                Vec::new()
            }
        };
        Ok(window(children, max_items, skip_count))
    }

    fn type_descendants(&self, type_id: Option<&str>, depth: i32) -> Result<Vec<TypeNode>> {
        if depth == 0 {
            return Err(RepoError::InvalidArgument {
                reason: "depth must not be 0".to_string(),
            });
        }
        let roots = match type_id {
            None => Self::base_types(),
            Some(id) => {
                self.type_definition(id)?;
                Vec::new()
            }
        };
        Ok(roots
            .into_iter()
            .map(|definition| TypeNode {
                definition,
                // Flat hierarchy: every base type is expanded and empty
                children: Some(Vec::new()),
            })
            .collect())
    }
}
