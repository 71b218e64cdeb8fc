// src/bookmarks/walk.rs
// =============================================================================
// Walks the bookmark tree depth-first and validates every link.
//
// How it works:
// 1. Start at the root with a trail holding just the root's name
// 2. Folders: extend the trail with the folder's name and walk the children
// 3. Links: ask LinkValidator::test whether to keep it
// 4. Build a copy of the tree holding only the kept links
//
// Links are tested one at a time, in the order they appear in the tree, so
// the report and the log read top to bottom like the bookmarks themselves.
// =============================================================================

use super::tree::BookmarkNode;
use crate::probe::Probe;
use crate::validator::{LinkValidator, Trail};
use futures::future::{FutureExt, LocalBoxFuture};
use tracing::info;

// Validates every link below `root` and returns the tree without the rejected
// ones. Folders are always kept, even when all their links were dropped.
//
// Returns None only when `root` is itself a link and it was rejected.
pub async fn prune<P: Probe>(
    root: &BookmarkNode,
    validator: &mut LinkValidator<P>,
) -> Option<BookmarkNode> {
    info!(
        "Validating {} link(s) under '{}'",
        root.link_count(),
        root.name
    );

    match root.as_bookmark() {
        // A lone link as the whole tree: nothing above it
        Some(bookmark) => validator
            .test(&bookmark, &Trail::new())
            .await
            .then(|| root.clone()),
        None => Some(prune_folder(root, Trail::root(root.name.clone()), validator).await),
    }
}

// Async functions can't call themselves directly (the future would have an
// infinite size), so the recursion goes through a boxed future
fn prune_folder<'a, P: Probe + 'a>(
    folder: &'a BookmarkNode,
    trail: Trail,
    validator: &'a mut LinkValidator<P>,
) -> LocalBoxFuture<'a, BookmarkNode> {
    async move {
        let mut children = Vec::with_capacity(folder.children.len());

        for child in &folder.children {
            match child.as_bookmark() {
                Some(bookmark) => {
                    if validator.test(&bookmark, &trail).await {
                        children.push(child.clone());
                    }
                }
                None => {
                    let sub_trail = trail.child(child.name.clone());
                    children.push(prune_folder(child, sub_trail, &mut *validator).await);
                }
            }
        }

        BookmarkNode::folder(folder.name.clone(), children)
    }
    .boxed_local()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why LocalBoxFuture instead of plain async fn recursion?
//    - An async fn compiles into a state machine that contains the futures
//      of everything it awaits
//    - Awaiting itself would make that state machine contain itself
//    - Boxing puts the inner future on the heap, which breaks the cycle
//    - "Local" because we never send it to another thread, so no Send bound
//
// 2. What is `&mut *validator`?
//    - A reborrow: a fresh, shorter-lived &mut from the one we hold
//    - Lets us hand the validator to the recursive call and still use it
//      afterwards in the loop
// -----------------------------------------------------------------------------
