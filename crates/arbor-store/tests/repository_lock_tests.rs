//! Lock acquire/release discipline across success and failure paths

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use arbor_core::store::ContentStore;
use arbor_core::{RepoError, Repository, Session};
use arbor_core_types::ItemId;

use common::{create_doc, ctx, text_content, FailingStore};

fn failing_repo() -> (Arc<FailingStore>, Repository) {
    let store = Arc::new(FailingStore::new());
    let repo = Repository::new(store.clone(), common::repo_config(store.root_id()));
    (store, repo)
}

fn lock_holder(store: &FailingStore, id: &str) -> Option<String> {
    let session = Session::new("anonymous");
    let item = store
        .read_item(&session, ItemId::parse(id).unwrap())
        .unwrap();
    item.lock.holder().map(str::to_string)
}

#[test]
fn lock_is_released_after_a_successful_mutation() {
    let (store, repo) = failing_repo();
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"old");

    repo.set_content_stream(&ctx(), &id, text_content(b"new"), None).unwrap();
    assert_eq!(lock_holder(&store, &id), None);
}

#[test]
fn lock_is_released_when_the_backend_fails_mid_operation() {
    let (store, repo) = failing_repo();
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"old");

    store.fail_write_content.store(true, Ordering::SeqCst);
    let err = repo
        .set_content_stream(&ctx(), &id, text_content(b"new"), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::Backend { .. }));

    // The newly acquired lock was released on the failure path
    assert_eq!(lock_holder(&store, &id), None);
}

#[test]
fn pre_existing_caller_lock_is_never_released() {
    let (store, repo) = failing_repo();
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"old");
    let item_id = ItemId::parse(&id).unwrap();

    // The caller (same principal) already holds the lock
    let session = Session::new("anonymous");
    assert!(store.try_lock(&session, item_id).unwrap());

    repo.set_content_stream(&ctx(), &id, text_content(b"new"), None).unwrap();
    assert_eq!(lock_holder(&store, &id), Some("anonymous".to_string()));

    // Same on the failure path
    store.fail_write_content.store(true, Ordering::SeqCst);
    assert!(repo
        .set_content_stream(&ctx(), &id, text_content(b"x"), None)
        .is_err());
    assert_eq!(lock_holder(&store, &id), Some("anonymous".to_string()));
}

#[test]
fn move_failure_releases_the_lock() {
    let (store, repo) = failing_repo();
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"x");
    let target = repo
        .create_folder(&ctx(), &root, &common::name_props("sub"), None, None)
        .unwrap();

    store.fail_move.store(true, Ordering::SeqCst);
    assert!(repo.move_object(&ctx(), &id, &target).is_err());
    assert_eq!(lock_holder(&store, &id), None);

    // And the item is still where it was
    store.fail_move.store(false, Ordering::SeqCst);
    repo.move_object(&ctx(), &id, &target).unwrap();
}

#[test]
fn a_lock_held_by_another_principal_blocks_mutation() {
    let store = Arc::new(FailingStore::new());
    let repo = Repository::new(store.clone(), common::repo_config(store.root_id()));
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"x");
    let item_id = ItemId::parse(&id).unwrap();

    let other = Session::new("bob");
    assert!(store.try_lock(&other, item_id).unwrap());

    let err = repo
        .set_content_stream(&ctx(), &id, text_content(b"new"), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation { .. }));
    // The foreign lock is untouched
    assert_eq!(lock_holder(&store, &id), Some("bob".to_string()));
}

#[test]
fn delete_failure_releases_the_lock() {
    let (store, repo) = failing_repo();
    let root = store.root_id().to_string();
    let id = create_doc(&repo, &root, "a.txt", b"x");

    store.fail_delete.store(true, Ordering::SeqCst);
    assert!(repo.delete_object(&ctx(), &id).is_err());
    assert_eq!(lock_holder(&store, &id), None);

    store.fail_delete.store(false, Ordering::SeqCst);
    repo.delete_object(&ctx(), &id).unwrap();
}
