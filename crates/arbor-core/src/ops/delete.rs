//! Delete operations

use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::DeleteTreeResult;
use crate::store::{ContentStore, Session};

use super::with_item_lock;

/// Delete a single item; a folder must be empty
pub(crate) fn delete_object(
    store: &dyn ContentStore,
    session: &Session,
    item_id: ItemId,
) -> Result<()> {
    let item = store.read_item(session, item_id)?;
    if item.parent_path().is_none() {
        return Err(RepoError::ConstraintViolation {
            reason: "cannot delete the root folder".to_string(),
        });
    }
    if item.is_folder() && !store.list_children(session, item.id)?.is_empty() {
        return Err(RepoError::ConstraintViolation {
            reason: format!("folder is not empty: {}", item.path),
        });
    }

    tracing::debug!(path = %item.path, "deleting item");
    with_item_lock(store, session, item.id, || {
        store.delete_item(session, &item.path).map_err(Into::into)
    })
}

/// Delete a folder and its whole subtree, leaving siblings untouched
///
/// All-or-nothing: the failure report is always empty on success, and any
/// store failure propagates as an error instead of a partial report.
pub(crate) fn delete_tree(
    store: &dyn ContentStore,
    session: &Session,
    folder_id: ItemId,
) -> Result<DeleteTreeResult> {
    let folder = store.read_item(session, folder_id)?;
    if !folder.is_folder() {
        return Err(RepoError::ConstraintViolation {
            reason: format!("not a folder: {}", folder.path),
        });
    }
    if folder.parent_path().is_none() {
        return Err(RepoError::ConstraintViolation {
            reason: "cannot delete the root folder".to_string(),
        });
    }

    tracing::debug!(path = %folder.path, "deleting subtree");
    with_item_lock(store, session, folder.id, || {
        store.delete_item(session, &folder.path).map_err(Into::into)
    })?;
    Ok(DeleteTreeResult::default())
}
