// src/bookmarks/tree.rs
// =============================================================================
// The bookmark tree as read from (and written back to) JSON.
//
// Example:
//   { "name": "Bookmarks", "children": [
//       { "name": "Rust", "uri": "https://www.rust-lang.org" },
//       { "name": "Music", "children": [] } ] }
//
// A node with a "uri" is a link, any other node is a folder.
// =============================================================================

use crate::validator::BookmarkRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BookmarkNode>,
}

impl BookmarkNode {
    pub fn folder(name: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            name: name.into(),
            uri: None,
            children,
        }
    }

    pub fn link(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: Some(uri.into()),
            children: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_link(&self) -> bool {
        self.uri.is_some()
    }

    /// The view handed to the validator, None for folders
    pub fn as_bookmark(&self) -> Option<BookmarkRef> {
        self.uri
            .as_ref()
            .map(|uri| BookmarkRef::new(self.name.clone(), uri.clone()))
    }

    /// Number of links anywhere below (and including) this node
    pub fn link_count(&self) -> usize {
        let own = usize::from(self.is_link());
        own + self.children.iter().map(BookmarkNode::link_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree() {
        let json = r#"{
            "name": "Bookmarks",
            "children": [
                { "name": "Rust", "uri": "https://www.rust-lang.org" },
                { "name": "Music", "children": [
                    { "name": "Jazz", "uri": "http://jazz.example/" }
                ]},
                { "name": "Empty" }
            ]
        }"#;

        let root = BookmarkNode::from_json(json).unwrap();
        assert_eq!(root.children.len(), 3);
        assert!(root.children[0].is_link());
        assert!(!root.children[1].is_link());
        assert!(root.children[2].children.is_empty());
        assert_eq!(root.link_count(), 2);
    }

    #[test]
    fn test_as_bookmark() {
        let link = BookmarkNode::link("Rust", "https://www.rust-lang.org");
        assert_eq!(
            link.as_bookmark(),
            Some(BookmarkRef::new("Rust", "https://www.rust-lang.org"))
        );
        assert_eq!(BookmarkNode::folder("Music", vec![]).as_bookmark(), None);
    }

    #[test]
    fn test_folders_serialize_without_uri() {
        let tree = BookmarkNode::folder("Root", vec![BookmarkNode::link("A", "http://a.example/")]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Root","children":[{"name":"A","uri":"http://a.example/"}]}"#
        );
    }
}
