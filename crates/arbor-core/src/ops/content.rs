//! Content-stream mutation

use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::model::ContentStreamData;
use crate::store::{ContentStore, Session};

use super::with_item_lock;

/// Replace a document's content bytes
///
/// Overwrite defaults to true; an explicit false while content exists is
/// refused. Folders never accept a content stream.
pub(crate) fn set_content_stream(
    store: &dyn ContentStore,
    session: &Session,
    item_id: ItemId,
    content: ContentStreamData,
    overwrite: Option<bool>,
) -> Result<()> {
    let item = store.read_item(session, item_id)?;
    if item.is_folder() {
        return Err(RepoError::StreamNotSupported {
            object: item.path.clone(),
        });
    }
    if !overwrite.unwrap_or(true) && item.content_length > 0 {
        return Err(RepoError::ContentAlreadyExists {
            object: item.path.clone(),
        });
    }

    tracing::debug!(path = %item.path, bytes = content.length(), "writing content stream");
    with_item_lock(store, session, item.id, || {
        store
            .write_content(session, item.id, content.bytes)
            .map_err(Into::into)
    })
}

/// Content-stream deletion is not exposed by this pipeline
pub(crate) fn delete_content_stream() -> Result<()> {
    Err(RepoError::NotSupported {
        reason: "content stream deletion is not supported".to_string(),
    })
}
