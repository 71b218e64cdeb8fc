// src/bookmarks/mod.rs
// =============================================================================
// This module handles the bookmark tree that gets validated.
//
// Features:
// - A minimal JSON bookmark tree (folders with children, links with a uri)
// - A depth-first walk that tests every link in tree order and builds a
//   copy of the tree without the links that failed
//
// Reading browser bookmark stores is someone else's job; anything that can
// produce this JSON shape can be checked.
// =============================================================================

mod tree;
mod walk;

pub use tree::BookmarkNode;
pub use walk::prune;
