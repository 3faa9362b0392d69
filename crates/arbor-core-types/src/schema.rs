//! Canonical schema constants for the repository object model
//!
//! These constants keep property keys and type identifiers consistent across
//! the mappers, the mutation pipeline, and any protocol binding.

/// Vendor namespace prefix carried by every repository type id
pub const VENDOR_NAMESPACE: &str = "arbor";

// Canonical property keys
pub const PROP_NAME: &str = "arbor:name";
pub const PROP_SOURCE_ID: &str = "arbor:sourceId";
pub const PROP_TARGET_ID: &str = "arbor:targetId";
pub const PROP_TYPE_ID: &str = "arbor:objectTypeId";
pub const PROP_KIND: &str = "arbor:resourceKind";

// Base type identifiers
pub const TYPE_FOLDER: &str = "arbor:folder";
pub const TYPE_DOCUMENT: &str = "arbor:document";
pub const TYPE_RELATIONSHIP: &str = "arbor:relationship";

/// Build a namespaced relationship type id from a bare relation type name
pub fn relationship_type_id(type_name: &str) -> String {
    format!("{}:{}", VENDOR_NAMESPACE, type_name)
}

/// Strip the vendor namespace from a type id, if present
pub fn strip_namespace(type_id: &str) -> Option<&str> {
    type_id.strip_prefix(VENDOR_NAMESPACE)?.strip_prefix(':')
}
