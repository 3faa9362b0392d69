//! Create-class operations: documents, folders, copies, relationships

use arbor_core_types::schema::{strip_namespace, PROP_SOURCE_ID, PROP_TARGET_ID, PROP_TYPE_ID};
use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::property::get_string;
use crate::model::{AclEntry, ContentStreamData, ItemKind, PropertyBag, RelationshipId};
use crate::paths;
use crate::store::{ContentStore, Session};

use super::{check_name, custom_properties, reject_aces, require_name, with_item_lock};

fn require_folder_target(
    store: &dyn ContentStore,
    session: &Session,
    folder_id: ItemId,
) -> Result<crate::model::ContentItem> {
    let folder = store.read_item(session, folder_id)?;
    if !folder.is_folder() {
        return Err(RepoError::ConstraintViolation {
            reason: format!("target is not a folder: {}", folder.path),
        });
    }
    Ok(folder)
}

/// Create a document in a folder and return its id
pub(crate) fn create_document(
    store: &dyn ContentStore,
    session: &Session,
    folder_id: ItemId,
    properties: &PropertyBag,
    content: Option<ContentStreamData>,
    add_aces: Option<&[AclEntry]>,
    remove_aces: Option<&[AclEntry]>,
) -> Result<ItemId> {
    reject_aces(add_aces, remove_aces)?;
    let name = require_name(properties)?;
    let content = content.ok_or_else(|| RepoError::ConstraintViolation {
        reason: "a content stream is required".to_string(),
    })?;

    // The store owns name-to-kind resolution for new entries
    let kind = store.default_kind_for_name(name);
    if kind != ItemKind::Document {
        return Err(RepoError::ConstraintViolation {
            reason: format!("name does not resolve to a document kind: {}", name),
        });
    }

    let folder = require_folder_target(store, session, folder_id)?;
    let path = paths::join(&folder.path, name);

    tracing::debug!(path = %path, "creating document");
    let created = store.create_item(
        session,
        &path,
        kind,
        Some(content.bytes),
        custom_properties(properties),
    )?;
    store.unlock(session, created.id)?;
    Ok(created.id)
}

/// Create a folder and return its id
pub(crate) fn create_folder(
    store: &dyn ContentStore,
    session: &Session,
    folder_id: ItemId,
    properties: &PropertyBag,
    add_aces: Option<&[AclEntry]>,
    remove_aces: Option<&[AclEntry]>,
) -> Result<ItemId> {
    reject_aces(add_aces, remove_aces)?;
    let name = require_name(properties)?;

    let folder = require_folder_target(store, session, folder_id)?;
    let path = paths::join(&folder.path, name);

    tracing::debug!(path = %path, "creating folder");
    let created = store.create_item(session, &path, ItemKind::Folder, None, custom_properties(properties))?;
    store.unlock(session, created.id)?;
    Ok(created.id)
}

/// Copy a document into a folder and return the copy's id
///
/// The supplied property bag replaces the copied one, and the modification
/// timestamp is re-stamped from the copy's creation timestamp.
pub(crate) fn copy_document(
    store: &dyn ContentStore,
    session: &Session,
    source_id: ItemId,
    folder_id: ItemId,
    properties: &PropertyBag,
    add_aces: Option<&[AclEntry]>,
    remove_aces: Option<&[AclEntry]>,
) -> Result<ItemId> {
    reject_aces(add_aces, remove_aces)?;

    let source = store.read_item(session, source_id)?;
    if !source.is_document() {
        return Err(RepoError::ConstraintViolation {
            reason: format!("copy source is not a document: {}", source.path),
        });
    }
    let folder = require_folder_target(store, session, folder_id)?;

    let name = match get_string(properties, arbor_core_types::schema::PROP_NAME) {
        Some(name) => {
            check_name(name)?;
            name.to_string()
        }
        None => source.name().to_string(),
    };
    let target_path = paths::join(&folder.path, &name);

    tracing::debug!(source = %source.path, target = %target_path, "copying document");
    let copy = store.copy_item(session, &source.path, &target_path)?;
    store.write_properties(session, copy.id, custom_properties(properties))?;
    store.restamp_modified(session, copy.id, copy.created_at)?;
    store.unlock(session, copy.id)?;
    Ok(copy.id)
}

/// Create a typed relation between two items and return its synthesized id
///
/// The type id property must carry the vendor namespace; the bare remainder
/// becomes the relation type name. The source endpoint is locked for the
/// index write.
pub(crate) fn create_relationship(
    store: &dyn ContentStore,
    session: &Session,
    properties: &PropertyBag,
    add_aces: Option<&[AclEntry]>,
    remove_aces: Option<&[AclEntry]>,
) -> Result<String> {
    reject_aces(add_aces, remove_aces)?;

    let type_id = get_string(properties, PROP_TYPE_ID).ok_or_else(|| {
        RepoError::ConstraintViolation {
            reason: format!("missing required property {}", PROP_TYPE_ID),
        }
    })?;
    let type_name = strip_namespace(type_id)
        .ok_or_else(|| RepoError::ConstraintViolation {
            reason: format!("relationship type must carry the vendor namespace: {}", type_id),
        })?
        .to_string();

    let source_id = endpoint_id(properties, PROP_SOURCE_ID)?;
    let target_id = endpoint_id(properties, PROP_TARGET_ID)?;

    let source = store.read_item(session, source_id)?;
    let target = store.read_item(session, target_id)?;

    tracing::debug!(source = %source.path, target = %target.path, r#type = %type_name, "creating relationship");
    with_item_lock(store, session, source.id, || {
        store
            .add_relation(session, &source.path, &target.path, &type_name)
            .map_err(Into::into)
    })?;

    Ok(RelationshipId {
        source_id,
        target_id,
        type_name,
    }
    .to_string())
}

fn endpoint_id(properties: &PropertyBag, key: &str) -> Result<ItemId> {
    let text = get_string(properties, key).ok_or_else(|| RepoError::InvalidArgument {
        reason: format!("missing required property {}", key),
    })?;
    ItemId::parse(text).map_err(|_| RepoError::InvalidArgument {
        reason: format!("malformed item id in {}: {}", key, text),
    })
}
