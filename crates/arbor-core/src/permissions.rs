//! Static permission and capability table
//!
//! Every gated protocol action is bound to exactly one permission level.
//! The table is process-wide, immutable, and surfaced verbatim as
//! repository capability metadata; components receive it by reference
//! rather than fetching it from ambient state.

use serde::{Deserialize, Serialize};

use crate::model::PermissionLevel;

/// A permission level with its human-readable description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionDefinition {
    pub permission: PermissionLevel,
    pub description: &'static str,
}

/// The three exposed permission levels
pub static PERMISSION_DEFINITIONS: &[PermissionDefinition] = &[
    PermissionDefinition {
        permission: PermissionLevel::Read,
        description: "Read",
    },
    PermissionDefinition {
        permission: PermissionLevel::Write,
        description: "Write",
    },
    PermissionDefinition {
        permission: PermissionLevel::All,
        description: "All",
    },
];

/// Every permission-gated protocol action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GatedAction {
    CreateDocumentInFolder,
    CreateFolderInFolder,
    DeleteContentOfDocument,
    DeleteObject,
    DeleteTreeOfFolder,
    GetAclOfObject,
    GetAllVersions,
    GetChildrenOfFolder,
    GetDescendantsOfFolder,
    GetFolderParentOfObject,
    GetParentsOfFolder,
    GetPropertiesOfObject,
    MoveObject,
    MoveSource,
    MoveTarget,
    SetContentOfDocument,
    UpdatePropertiesOfObject,
    ViewContentOfObject,
}

impl GatedAction {
    /// The protocol-facing mapping key
    pub fn key(&self) -> &'static str {
        match self {
            GatedAction::CreateDocumentInFolder => "canCreateDocument.Folder",
            GatedAction::CreateFolderInFolder => "canCreateFolder.Folder",
            GatedAction::DeleteContentOfDocument => "canDeleteContent.Document",
            GatedAction::DeleteObject => "canDelete.Object",
            GatedAction::DeleteTreeOfFolder => "canDeleteTree.Folder",
            GatedAction::GetAclOfObject => "canGetAcl.Object",
            GatedAction::GetAllVersions => "canGetAllVersions.VersionSeries",
            GatedAction::GetChildrenOfFolder => "canGetChildren.Folder",
            GatedAction::GetDescendantsOfFolder => "canGetDescendents.Folder",
            GatedAction::GetFolderParentOfObject => "canGetFolderParent.Object",
            GatedAction::GetParentsOfFolder => "canGetParents.Folder",
            GatedAction::GetPropertiesOfObject => "canGetProperties.Object",
            GatedAction::MoveObject => "canMove.Object",
            GatedAction::MoveSource => "canMove.Source",
            GatedAction::MoveTarget => "canMove.Target",
            GatedAction::SetContentOfDocument => "canSetContent.Document",
            GatedAction::UpdatePropertiesOfObject => "canUpdateProperties.Object",
            GatedAction::ViewContentOfObject => "canViewContent.Object",
        }
    }
}

/// The action-to-permission table; each action maps to exactly one level
pub static PERMISSION_MAPPINGS: &[(GatedAction, PermissionLevel)] = &[
    (GatedAction::CreateDocumentInFolder, PermissionLevel::Write),
    (GatedAction::CreateFolderInFolder, PermissionLevel::Write),
    (GatedAction::DeleteContentOfDocument, PermissionLevel::Write),
    (GatedAction::DeleteObject, PermissionLevel::Write),
    (GatedAction::DeleteTreeOfFolder, PermissionLevel::Write),
    (GatedAction::GetAclOfObject, PermissionLevel::Read),
    (GatedAction::GetAllVersions, PermissionLevel::Read),
    (GatedAction::GetChildrenOfFolder, PermissionLevel::Read),
    (GatedAction::GetDescendantsOfFolder, PermissionLevel::Read),
    (GatedAction::GetFolderParentOfObject, PermissionLevel::Read),
    (GatedAction::GetParentsOfFolder, PermissionLevel::Read),
    (GatedAction::GetPropertiesOfObject, PermissionLevel::Read),
    (GatedAction::MoveObject, PermissionLevel::Write),
    (GatedAction::MoveSource, PermissionLevel::Write),
    (GatedAction::MoveTarget, PermissionLevel::Write),
    (GatedAction::SetContentOfDocument, PermissionLevel::Write),
    (GatedAction::UpdatePropertiesOfObject, PermissionLevel::Write),
    (GatedAction::ViewContentOfObject, PermissionLevel::Read),
];

/// Look up the permission level required for a gated action
pub fn required_permission(action: GatedAction) -> PermissionLevel {
    PERMISSION_MAPPINGS
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, level)| *level)
        .unwrap_or(PermissionLevel::All)
}
