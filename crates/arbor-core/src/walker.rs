//! Tree traversal
//!
//! One-level child listing (windowed) and recursive descendant traversal.
//! Descendant depth rules: zero is invalid, negative means unlimited, N > 0
//! visits exactly N levels below the start folder. Children are ordered by
//! ascending lexical name before mapping; document children can be filtered
//! out wholesale while folder children are still descended into.

use std::collections::BTreeSet;

use arbor_core_types::ItemId;

use crate::errors::{RepoError, Result};
use crate::mapper::{map_item, MapEnv, MapFlags};
use crate::model::{ContentItem, ObjectInFolder, TreeNode};
use crate::paging::{window, Page};

fn require_folder(env: &MapEnv<'_>, folder_id: ItemId) -> Result<ContentItem> {
    let item = env.store.read_item(env.session, folder_id)?;
    if !item.is_folder() {
        return Err(RepoError::InvalidArgument {
            reason: format!("not a folder: {}", item.path),
        });
    }
    Ok(item)
}

/// List one level of a folder's children, windowed
pub fn list_children(
    env: &MapEnv<'_>,
    folder_id: ItemId,
    filter: Option<&BTreeSet<String>>,
    flags: MapFlags,
    max_items: Option<i64>,
    skip_count: Option<i64>,
    include_path_segments: bool,
) -> Result<Page<ObjectInFolder>> {
    let folder = require_folder(env, folder_id)?;
    let children = env.store.list_children(env.session, folder.id)?;
    let page = window(children, max_items, skip_count);

    let mut objects = Vec::with_capacity(page.items.len());
    for child in &page.items {
        let object = map_item(env, child, filter, flags)?;
        objects.push(ObjectInFolder {
            object,
            path_segment: include_path_segments.then(|| child.name().to_string()),
        });
    }

    Ok(Page {
        items: objects,
        num_items: page.num_items,
        has_more: page.has_more,
    })
}

/// Walk the subtree below a folder
///
/// Returns the nodes at level one; each folder node within the depth limit
/// carries `Some` children (possibly empty), while nodes at the limit and
/// document nodes carry `None`.
pub fn list_descendants(
    env: &MapEnv<'_>,
    folder_id: ItemId,
    depth: i32,
    filter: Option<&BTreeSet<String>>,
    flags: MapFlags,
    folders_only: bool,
    include_path_segments: bool,
) -> Result<Vec<TreeNode>> {
    if depth == 0 {
        return Err(RepoError::InvalidArgument {
            reason: "depth must not be 0".to_string(),
        });
    }
    let folder = require_folder(env, folder_id)?;
    gather_levels(env, &folder, depth, filter, flags, folders_only, include_path_segments)
}

fn gather_levels(
    env: &MapEnv<'_>,
    folder: &ContentItem,
    levels: i32,
    filter: Option<&BTreeSet<String>>,
    flags: MapFlags,
    folders_only: bool,
    include_path_segments: bool,
) -> Result<Vec<TreeNode>> {
    let mut children = env.store.list_children(env.session, folder.id)?;
    children.sort_by(|a, b| a.name().cmp(b.name()));

    let mut nodes = Vec::new();
    for child in children {
        if child.is_document() && folders_only {
            continue;
        }

        let object = map_item(env, &child, filter, flags)?;
        let entry = ObjectInFolder {
            object,
            path_segment: include_path_segments.then(|| child.name().to_string()),
        };

        // levels == 1 means this is the last visited level; a negative
        // remainder never runs out
        let descend = child.is_folder() && levels != 1;
        let grandchildren = if descend {
            Some(gather_levels(
                env,
                &child,
                if levels < 0 { levels } else { levels - 1 },
                filter,
                flags,
                folders_only,
                include_path_segments,
            )?)
        } else {
            None
        };

        nodes.push(TreeNode {
            object: entry,
            children: grandchildren,
        });
    }
    Ok(nodes)
}
