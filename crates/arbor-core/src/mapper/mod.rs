//! Object mappers
//!
//! Two mapping strategies build protocol-facing representations: one for
//! native content items, one for synthesized relationship pseudo-objects.
//! Both share the property filter, the response flags, and the optional
//! response-shaping sink.

pub mod item;
pub mod relationship;

pub use item::map_item;
pub use relationship::{map_relationship, relations_of};

use std::collections::BTreeSet;

use arbor_core_types::schema::strip_namespace;
use arbor_core_types::ItemId;

use crate::model::{ObjectRepr, PropertyBag};
use crate::store::{ContentStore, Session};

/// Response-shaping flags for a mapping call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapFlags {
    pub include_allowable_actions: bool,
    pub include_acl: bool,
}

/// Opaque pass-through sink for built object representations
///
/// Protocol bindings register response metadata through this; the mappers
/// call it only when the call context requires object info.
pub trait ObjectSink: Send + Sync {
    fn register(&self, object: &ObjectRepr);
}

/// Shared environment for one mapping pass
///
/// Bundles the store session, the repository facts the mappers need
/// (read-only mode, root identity), and the optional sink.
pub struct MapEnv<'a> {
    pub store: &'a dyn ContentStore,
    pub session: &'a Session,
    pub read_only: bool,
    pub root_id: ItemId,
    pub sink: Option<&'a dyn ObjectSink>,
    /// Whether built representations are registered with the sink
    pub register_objects: bool,
}

impl MapEnv<'_> {
    pub(crate) fn register(&self, object: &ObjectRepr) {
        if self.register_objects {
            if let Some(sink) = self.sink {
                sink.register(object);
            }
        }
    }
}

/// Parse a comma-separated property filter into a name set
///
/// `None`, blank, or a filter containing `*` means "all properties".
pub fn split_filter(filter: Option<&str>) -> Option<BTreeSet<String>> {
    let filter = filter?;
    if filter.trim().is_empty() {
        return None;
    }
    let names: BTreeSet<String> = filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.contains("*") {
        return None;
    }
    Some(names)
}

/// Apply a property filter to a bag
///
/// A property survives when the filter names either its full key or its
/// namespace-stripped name. Requested names with no matching property are
/// silently ignored.
pub(crate) fn filter_properties(bag: PropertyBag, filter: Option<&BTreeSet<String>>) -> PropertyBag {
    match filter {
        None => bag,
        Some(names) => bag
            .into_iter()
            .filter(|(key, _)| {
                names.contains(key.as_str())
                    || strip_namespace(key).is_some_and(|bare| names.contains(bare))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;

    #[test]
    fn test_split_filter_all_forms() {
        assert_eq!(split_filter(None), None);
        assert_eq!(split_filter(Some("")), None);
        assert_eq!(split_filter(Some("*")), None);
        assert_eq!(split_filter(Some("a, *")), None);

        let names = split_filter(Some("arbor:name, title,")).unwrap();
        assert!(names.contains("arbor:name"));
        assert!(names.contains("title"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_filter_matches_stripped_names() {
        let mut bag = PropertyBag::new();
        bag.insert("arbor:name".to_string(), PropertyValue::from("a.txt"));
        bag.insert("title".to_string(), PropertyValue::from("hello"));

        let names: BTreeSet<String> = ["name".to_string()].into();
        let filtered = filter_properties(bag, Some(&names));
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("arbor:name"));
    }

    #[test]
    fn test_unknown_requested_names_are_ignored() {
        let mut bag = PropertyBag::new();
        bag.insert("title".to_string(), PropertyValue::from("hello"));

        let names: BTreeSet<String> = ["missing".to_string(), "title".to_string()].into();
        let filtered = filter_properties(bag, Some(&names));
        assert_eq!(filtered.len(), 1);
    }
}
