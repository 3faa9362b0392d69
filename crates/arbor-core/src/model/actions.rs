use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::item::ItemKind;

/// The fixed set of actions a caller may be allowed to perform on an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AllowableAction {
    GetProperties,
    GetAcl,
    GetObjectParents,
    GetFolderParent,
    GetChildren,
    GetDescendants,
    GetContentStream,
    GetObjectRelationships,
    CreateDocument,
    CreateFolder,
    CreateRelationship,
    UpdateProperties,
    MoveObject,
    SetContentStream,
    DeleteObject,
    DeleteTree,
}

/// Compute the allowable actions for a content item
///
/// Read-class actions depend only on the item kind; every write-class action
/// is suppressed while the repository is in read-only mode. Content-stream
/// actions are invalid for folders, child/descendant actions are invalid for
/// documents, and the root can neither be moved, deleted, nor asked for a
/// parent.
pub fn allowable_actions(kind: ItemKind, read_only: bool, is_root: bool) -> BTreeSet<AllowableAction> {
    let mut actions = BTreeSet::new();

    actions.insert(AllowableAction::GetProperties);
    actions.insert(AllowableAction::GetAcl);
    actions.insert(AllowableAction::GetObjectRelationships);
    if !is_root {
        actions.insert(AllowableAction::GetObjectParents);
    }

    match kind {
        ItemKind::Folder => {
            actions.insert(AllowableAction::GetChildren);
            actions.insert(AllowableAction::GetDescendants);
            if !is_root {
                actions.insert(AllowableAction::GetFolderParent);
            }
        }
        ItemKind::Document => {
            actions.insert(AllowableAction::GetContentStream);
        }
    }

    if read_only {
        return actions;
    }

    actions.insert(AllowableAction::UpdateProperties);
    actions.insert(AllowableAction::CreateRelationship);
    if !is_root {
        actions.insert(AllowableAction::MoveObject);
        actions.insert(AllowableAction::DeleteObject);
    }

    match kind {
        ItemKind::Folder => {
            actions.insert(AllowableAction::CreateDocument);
            actions.insert(AllowableAction::CreateFolder);
            if !is_root {
                actions.insert(AllowableAction::DeleteTree);
            }
        }
        ItemKind::Document => {
            actions.insert(AllowableAction::SetContentStream);
        }
    }

    actions
}
