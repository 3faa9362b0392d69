//! Mutation pipeline
//!
//! Every mutating operation shares the same precondition order — ACL
//! parameter rejection, then name validity — and the same lock discipline:
//! a lock newly acquired for the operation is released on every exit path,
//! a lock the caller already held is never touched. The read-only gate runs
//! before any of this, in the repository facade.

pub mod content;
pub mod create;
pub mod delete;
pub mod update;

use arbor_core_types::schema::{PROP_NAME, PROP_SOURCE_ID, PROP_TARGET_ID, PROP_TYPE_ID};
use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::{AclEntry, PropertyBag};
use crate::store::{ContentStore, Session, StoreError};

/// Validate a supplied item name
///
/// Names must be non-blank and must not contain a path separator.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if crate::paths::is_blank(name) {
        return Err(RepoError::NameConstraintViolation {
            reason: "name must not be empty".to_string(),
        });
    }
    if name.contains('/') {
        return Err(RepoError::NameConstraintViolation {
            reason: format!("name must not contain '/': {}", name),
        });
    }
    Ok(())
}

/// Extract and validate a required name from a property bag
pub(crate) fn require_name(properties: &PropertyBag) -> Result<&str> {
    let name = crate::model::property::get_string(properties, PROP_NAME).ok_or_else(|| {
        RepoError::InvalidArgument {
            reason: format!("missing required property {}", PROP_NAME),
        }
    })?;
    check_name(name)?;
    Ok(name)
}

/// Reject ACL parameters on create-class operations
///
/// Native ACL mutation is not exposed through this pipeline.
pub(crate) fn reject_aces(
    add_aces: Option<&[AclEntry]>,
    remove_aces: Option<&[AclEntry]>,
) -> Result<()> {
    if add_aces.is_some() || remove_aces.is_some() {
        return Err(RepoError::ConstraintViolation {
            reason: "ACL parameters are not supported on create operations".to_string(),
        });
    }
    Ok(())
}

/// The subset of a property bag that is written to the store
///
/// Canonical keys are consumed by the pipeline itself and never stored.
pub(crate) fn custom_properties(properties: &PropertyBag) -> PropertyBag {
    const CANONICAL: [&str; 4] = [PROP_NAME, PROP_TYPE_ID, PROP_SOURCE_ID, PROP_TARGET_ID];
    properties
        .iter()
        .filter(|(key, _)| !CANONICAL.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Acquire an item's lock if the session does not already hold it
///
/// Returns whether the lock was newly acquired by this call. A lock held by
/// another principal surfaces as a constraint violation.
pub(crate) fn ensure_lock(
    store: &dyn ContentStore,
    session: &Session,
    id: ItemId,
) -> Result<bool> {
    match store.try_lock(session, id) {
        Ok(newly_acquired) => Ok(newly_acquired),
        Err(StoreError::LockContention { id, held_by }) => Err(RepoError::ConstraintViolation {
            reason: format!("item {} is locked by {}", id, held_by),
        }),
        Err(other) => Err(other.into()),
    }
}

/// Run a mutation under the item's lock
///
/// The lock is released iff it was newly acquired, whether `f` succeeds or
/// fails. An unlock failure after a successful mutation is surfaced; after a
/// failed mutation the original error wins.
pub(crate) fn with_item_lock<T, F>(
    store: &dyn ContentStore,
    session: &Session,
    id: ItemId,
    f: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let newly_acquired = ensure_lock(store, session, id)?;
    let result = f();
    if newly_acquired {
        if let Err(unlock_err) = store.unlock(session, id) {
            tracing::warn!(item = %id, error = %unlock_err, "failed to release item lock");
            if result.is_ok() {
                return Err(unlock_err.into());
            }
        }
    }
    result
}
