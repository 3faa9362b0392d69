//! Relationship mapping
//!
//! Relationships are not stored nodes; they are (source, target, type)
//! triples read from the store's relation index and surfaced as
//! pseudo-objects under a synthesized id. Enumeration preserves store
//! order; triples with a nil endpoint are discarded before mapping.

use std::collections::BTreeSet;

use arbor_core_types::schema::{
    relationship_type_id, PROP_NAME, PROP_SOURCE_ID, PROP_TARGET_ID, PROP_TYPE_ID,
};
use arbor_core_types::ItemId;

use crate::errors::Result;
use crate::model::{
    AllowableAction, BaseKind, ContentItem, PropertyBag, PropertyValue, Relation,
    RelationDirection, RelationshipId,
};
use crate::store::{ContentStore, Session};

use super::{filter_properties, MapEnv, MapFlags};

/// Enumerate the relations anchored at an item
///
/// Relations whose source or target endpoint is nil are dropped; the
/// survivors keep the order the store returned them in.
pub fn relations_of(
    store: &dyn ContentStore,
    session: &Session,
    item_id: ItemId,
    direction: RelationDirection,
) -> Result<Vec<Relation>> {
    let relations = store.relations_of(session, item_id, direction)?;
    Ok(relations
        .into_iter()
        .filter(|r| !r.source_id.is_nil() && !r.target_id.is_nil())
        .collect())
}

/// Map a relation triple to its pseudo-object representation
///
/// The anchor item lends its timestamps; the declared type is the relation's
/// type name under the vendor namespace, and the synthesized id doubles as
/// the object name.
pub fn map_relationship(
    env: &MapEnv<'_>,
    anchor: &ContentItem,
    relation: &Relation,
    filter: Option<&BTreeSet<String>>,
    flags: MapFlags,
) -> crate::model::ObjectRepr {
    let rel_id = RelationshipId::from(relation);
    let object_id = rel_id.to_string();
    let type_id = relationship_type_id(&relation.type_name);

    let mut properties = PropertyBag::new();
    properties.insert(PROP_NAME.to_string(), PropertyValue::from(object_id.clone()));
    properties.insert(PROP_TYPE_ID.to_string(), PropertyValue::from(type_id.clone()));
    properties.insert(
        PROP_SOURCE_ID.to_string(),
        PropertyValue::from(relation.source_id.to_string()),
    );
    properties.insert(
        PROP_TARGET_ID.to_string(),
        PropertyValue::from(relation.target_id.to_string()),
    );
    let properties = filter_properties(properties, filter);

    // Pseudo-objects are read-only: properties and ACL retrieval only
    let allowable = flags.include_allowable_actions.then(|| {
        let mut actions = BTreeSet::new();
        actions.insert(AllowableAction::GetProperties);
        actions.insert(AllowableAction::GetAcl);
        actions
    });
    let acl = flags.include_acl.then(Vec::new);

    let repr = crate::model::ObjectRepr {
        object_id: object_id.clone(),
        name: object_id,
        base_kind: BaseKind::Relationship,
        type_id,
        path: None,
        created_at: anchor.created_at,
        modified_at: anchor.modified_at,
        properties,
        content_stream: None,
        source_id: Some(relation.source_id),
        target_id: Some(relation.target_id),
        allowable_actions: allowable,
        acl,
    };

    env.register(&repr);
    repr
}
