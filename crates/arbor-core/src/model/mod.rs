pub mod acl;
pub mod actions;
pub mod item;
pub mod object;
pub mod property;
pub mod relation;

pub use acl::{AccessBits, AccessEntry, AclEntry, PermissionLevel};
pub use actions::AllowableAction;
pub use item::{ContentItem, ItemKind, LockState};
pub use object::{
    BaseKind, ContentStreamData, ContentStreamInfo, DeleteTreeResult, ObjectInFolder, ObjectRepr,
    ParentData, TreeNode,
};
pub use property::{PropertyBag, PropertyValue};
pub use relation::{Relation, RelationDirection, RelationshipId, RELATIONSHIP_ID_MARKER};
