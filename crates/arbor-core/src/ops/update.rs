//! Move and property-update operations

use arbor_core_types::schema::PROP_NAME;
use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::property::get_string;
use crate::model::PropertyBag;
use crate::paths;
use crate::store::{ContentStore, Session};

use super::{check_name, custom_properties, with_item_lock};

/// Move an item into another folder, keeping its name
pub(crate) fn move_object(
    store: &dyn ContentStore,
    session: &Session,
    item_id: ItemId,
    target_folder_id: ItemId,
) -> Result<()> {
    let item = store.read_item(session, item_id)?;
    if item.parent_path().is_none() {
        return Err(RepoError::ConstraintViolation {
            reason: "cannot move the root folder".to_string(),
        });
    }

    let target = store.read_item(session, target_folder_id)?;
    if !target.is_folder() {
        return Err(RepoError::ConstraintViolation {
            reason: format!("move target is not a folder: {}", target.path),
        });
    }
    let new_path = paths::join(&target.path, item.name());

    tracing::debug!(from = %item.path, to = %new_path, "moving item");
    with_item_lock(store, session, item.id, || {
        store
            .move_item(session, &item.path, &new_path)
            .map_err(Into::into)
    })
}

/// Update an item's properties, renaming it when the name property differs
///
/// Properties are written first; the rename is a sibling move under the
/// unchanged parent. The item's id is stable across the move, so callers
/// must re-resolve by id afterwards, not by the old path.
pub(crate) fn update_properties(
    store: &dyn ContentStore,
    session: &Session,
    item_id: ItemId,
    properties: &PropertyBag,
) -> Result<()> {
    let item = store.read_item(session, item_id)?;

    // Validate the rename before any write happens
    let rename_to = match get_string(properties, PROP_NAME) {
        Some(new_name) if new_name != item.name() => {
            check_name(new_name)?;
            let parent = item.parent_path().ok_or_else(|| RepoError::ConstraintViolation {
                reason: "cannot rename the root folder".to_string(),
            })?;
            Some(paths::join(&parent, new_name))
        }
        _ => None,
    };

    tracing::debug!(path = %item.path, rename = rename_to.as_deref().unwrap_or(""), "updating properties");
    with_item_lock(store, session, item.id, || {
        store.write_properties(session, item.id, custom_properties(properties))?;
        if let Some(new_path) = &rename_to {
            store.move_item(session, &item.path, new_path)?;
        }
        Ok(())
    })
}
