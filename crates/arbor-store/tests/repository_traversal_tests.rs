//! Child listing, descendant traversal, and parent navigation

mod common;

use arbor_core::model::TreeNode;
use arbor_core::{MapFlags, RepoError};

use common::{create_doc, create_folder, ctx, repo_with_store};

/// Names of the nodes at one level of a descendant tree
fn level_names(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.object.object.name.as_str()).collect()
}

#[test]
fn children_window_matches_the_worked_example() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    create_doc(&repo, &root, "A", b"a");
    create_doc(&repo, &root, "B", b"b");
    create_folder(&repo, &root, "G");

    let page = repo
        .get_children(&ctx(), &root, None, MapFlags::default(), Some(1), Some(1), false)
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].object.name, "B");
    assert_eq!(page.num_items, 3);
    assert!(page.has_more);
}

#[test]
fn children_of_a_document_is_invalid_argument() {
    let (store, repo) = repo_with_store();
    let id = create_doc(&repo, &store.root_id().to_string(), "a.txt", b"x");
    assert!(matches!(
        repo.get_children(&ctx(), &id, None, MapFlags::default(), None, None, false),
        Err(RepoError::InvalidArgument { .. })
    ));
}

#[test]
fn path_segments_are_present_only_when_requested() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    create_doc(&repo, &root, "a.txt", b"x");

    let without = repo
        .get_children(&ctx(), &root, None, MapFlags::default(), None, None, false)
        .unwrap();
    assert_eq!(without.items[0].path_segment, None);

    let with = repo
        .get_children(&ctx(), &root, None, MapFlags::default(), None, None, true)
        .unwrap();
    assert_eq!(with.items[0].path_segment.as_deref(), Some("a.txt"));
}

/// Tree used by the descendant tests:
/// /
/// ├── a.txt
/// └── sub/
///     ├── b.txt
///     └── deeper/
///         └── c.txt
fn seed_tree(repo: &arbor_core::Repository, root: &str) {
    create_doc(repo, root, "a.txt", b"a");
    let sub = create_folder(repo, root, "sub");
    create_doc(repo, &sub, "b.txt", b"b");
    let deeper = create_folder(repo, &sub, "deeper");
    create_doc(repo, &deeper, "c.txt", b"c");
}

#[test]
fn descendants_depth_zero_is_invalid_argument() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    assert!(matches!(
        repo.get_descendants(&ctx(), &root, Some(0), None, MapFlags::default(), false),
        Err(RepoError::InvalidArgument { .. })
    ));
}

#[test]
fn descendants_depth_one_does_not_expand_folders() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(1), None, MapFlags::default(), false)
        .unwrap();
    assert_eq!(level_names(&nodes), ["a.txt", "sub"]);
    // The folder at the depth limit is not explored at all
    assert_eq!(nodes[1].children, None);
}

#[test]
fn descendants_depth_two_stops_at_level_two() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(2), None, MapFlags::default(), false)
        .unwrap();
    let sub = &nodes[1];
    let sub_children = sub.children.as_ref().unwrap();
    assert_eq!(level_names(sub_children), ["b.txt", "deeper"]);
    // "deeper" sits at level two; its own children are unexplored
    assert_eq!(sub_children[1].children, None);
}

#[test]
fn negative_depth_visits_every_level() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(-1), None, MapFlags::default(), false)
        .unwrap();
    let sub_children = nodes[1].children.as_ref().unwrap();
    let deeper_children = sub_children[1].children.as_ref().unwrap();
    assert_eq!(level_names(deeper_children), ["c.txt"]);
    // Documents are never expanded
    assert_eq!(deeper_children[0].children, None);
}

#[test]
fn explored_empty_folder_is_distinct_from_unexplored() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    create_folder(&repo, &root, "empty");

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(2), None, MapFlags::default(), false)
        .unwrap();
    // Within the depth limit: explored, and explicitly empty
    assert_eq!(nodes[0].children, Some(Vec::new()));

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(1), None, MapFlags::default(), false)
        .unwrap();
    // At the depth limit: not explored
    assert_eq!(nodes[0].children, None);
}

#[test]
fn absent_depth_defaults_to_two_levels() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    let nodes = repo
        .get_descendants(&ctx(), &root, None, None, MapFlags::default(), false)
        .unwrap();
    let sub_children = nodes[1].children.as_ref().unwrap();
    assert_eq!(level_names(sub_children), ["b.txt", "deeper"]);
    // Level three is beyond the default
    assert_eq!(sub_children[1].children, None);
}

#[test]
fn folder_tree_omits_documents_but_still_descends() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    seed_tree(&repo, &root);

    let nodes = repo
        .get_folder_tree(&ctx(), &root, Some(-1), None, MapFlags::default(), false)
        .unwrap();
    assert_eq!(level_names(&nodes), ["sub"]);

    let sub_children = nodes[0].children.as_ref().unwrap();
    assert_eq!(level_names(sub_children), ["deeper"]);
    // The same walk without the filter does yield the documents
    let full = repo
        .get_descendants(&ctx(), &root, Some(-1), None, MapFlags::default(), false)
        .unwrap();
    assert_eq!(level_names(&full), ["a.txt", "sub"]);
}

#[test]
fn descendant_levels_are_in_lexical_name_order() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    create_doc(&repo, &root, "zebra.txt", b"z");
    create_doc(&repo, &root, "alpha.txt", b"a");
    create_folder(&repo, &root, "mid");

    let nodes = repo
        .get_descendants(&ctx(), &root, Some(1), None, MapFlags::default(), false)
        .unwrap();
    assert_eq!(level_names(&nodes), ["alpha.txt", "mid", "zebra.txt"]);
}

#[test]
fn object_parents_of_root_is_empty() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    let parents = repo
        .get_object_parents(&ctx(), &root, None, MapFlags::default(), true)
        .unwrap();
    assert!(parents.is_empty());
}

#[test]
fn object_parents_carry_the_relative_segment() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    let sub = create_folder(&repo, &root, "sub");
    let id = create_doc(&repo, &sub, "a.txt", b"x");

    let parents = repo
        .get_object_parents(&ctx(), &id, None, MapFlags::default(), true)
        .unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].object.name, "sub");
    assert_eq!(parents[0].relative_path_segment.as_deref(), Some("a.txt"));

    let bare = repo
        .get_object_parents(&ctx(), &id, None, MapFlags::default(), false)
        .unwrap();
    assert_eq!(bare[0].relative_path_segment, None);
}

#[test]
fn folder_parent_of_root_is_invalid_argument() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    assert!(matches!(
        repo.get_folder_parent(&ctx(), &root, None, MapFlags::default()),
        Err(RepoError::InvalidArgument { .. })
    ));
}

#[test]
fn folder_parent_requires_a_folder() {
    let (store, repo) = repo_with_store();
    let root = store.root_id().to_string();
    let doc = create_doc(&repo, &root, "a.txt", b"x");
    assert!(matches!(
        repo.get_folder_parent(&ctx(), &doc, None, MapFlags::default()),
        Err(RepoError::InvalidArgument { .. })
    ));

    let sub = create_folder(&repo, &root, "sub");
    let parent = repo
        .get_folder_parent(&ctx(), &sub, None, MapFlags::default())
        .unwrap();
    assert_eq!(parent.object_id, root);
}
