//! Content-item mapping
//!
//! Builds the protocol-facing representation of a native folder or document:
//! base fields, the filtered property bag, a content-stream descriptor for
//! documents, and the optional allowable-action and ACL sections.

use std::collections::BTreeSet;

use arbor_core_types::schema::{PROP_NAME, PROP_TYPE_ID, TYPE_DOCUMENT, TYPE_FOLDER};

use crate::errors::Result;
use crate::model::acl::collapse;
use crate::model::actions::allowable_actions;
use crate::model::{BaseKind, ContentItem, ContentStreamInfo, ItemKind, PropertyValue};

use super::{filter_properties, MapEnv, MapFlags};

/// The fixed stream identifier carried by every document descriptor
pub const STREAM_ID: &str = "content";

/// Resolve a mime type from a path extension, with a fixed fallback
pub(crate) fn mime_type_of(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Map a native content item to its protocol-facing representation
pub fn map_item(
    env: &MapEnv<'_>,
    item: &ContentItem,
    filter: Option<&BTreeSet<String>>,
    flags: MapFlags,
) -> Result<crate::model::ObjectRepr> {
    let name = item.name().to_string();
    let (base_kind, type_id) = match item.kind {
        ItemKind::Folder => (BaseKind::Folder, TYPE_FOLDER),
        ItemKind::Document => (BaseKind::Document, TYPE_DOCUMENT),
    };

    let mut properties = item.properties.clone();
    properties.insert(PROP_NAME.to_string(), PropertyValue::from(name.clone()));
    properties.insert(PROP_TYPE_ID.to_string(), PropertyValue::from(type_id));
    let properties = filter_properties(properties, filter);

    let content_stream = match item.kind {
        ItemKind::Folder => None,
        ItemKind::Document => Some(ContentStreamInfo {
            length: item.content_length,
            mime_type: mime_type_of(&item.path),
            stream_id: STREAM_ID.to_string(),
            file_name: name.clone(),
        }),
    };

    let is_root = item.id == env.root_id;
    let allowable = flags
        .include_allowable_actions
        .then(|| allowable_actions(item.kind, env.read_only, is_root));

    let acl = if flags.include_acl {
        let entries = env.store.read_access_entries(env.session, item.id)?;
        Some(entries.iter().map(collapse).collect())
    } else {
        None
    };

    let repr = crate::model::ObjectRepr {
        object_id: item.id.to_string(),
        name,
        base_kind,
        type_id: type_id.to_string(),
        path: Some(item.path.clone()),
        created_at: item.created_at,
        modified_at: item.modified_at,
        properties,
        content_stream,
        source_id: None,
        target_id: None,
        allowable_actions: allowable,
        acl,
    };

    env.register(&repr);
    Ok(repr)
}
