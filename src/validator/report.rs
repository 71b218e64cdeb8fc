// src/validator/report.rs
// =============================================================================
// Bad and moved links collected during one validation run, grouped by trail.
//
// Counting rule: the counters go up once per failing (or moved) test() call,
// while each trail holds a *set* of bookmarks. Testing the same bookmark
// twice under the same trail therefore counts twice but is listed once.
// =============================================================================

use super::trail::{BookmarkRef, Trail};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

type Groups = BTreeMap<String, BTreeSet<BookmarkRef>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    error_count: usize,
    moved_count: usize,
    bad_links: Groups,
    moved_links: Groups,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bad(&mut self, bookmark: &BookmarkRef, trail: &Trail) {
        self.error_count += 1;
        insert_unless_listed(&mut self.bad_links, &self.moved_links, bookmark, trail);
    }

    pub fn record_moved(&mut self, bookmark: &BookmarkRef, trail: &Trail) {
        self.moved_count += 1;
        insert_unless_listed(&mut self.moved_links, &self.bad_links, bookmark, trail);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn moved_count(&self) -> usize {
        self.moved_count
    }

    /// Trail string -> bad bookmarks under it
    pub fn bad_links(&self) -> &BTreeMap<String, BTreeSet<BookmarkRef>> {
        &self.bad_links
    }

    /// Trail string -> moved bookmarks under it
    pub fn moved_links(&self) -> &BTreeMap<String, BTreeSet<BookmarkRef>> {
        &self.moved_links
    }

    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.moved_count == 0
    }

    /// Human readable listing: bad links first, then moved links, each trail
    /// with its bookmarks below it. Trails come out in string order, so the
    /// same run always dumps the same text.
    ///
    /// An empty `header` writes no header line at all, so the listing then
    /// starts directly with the bad links count.
    pub fn dump(&self, header: &str) -> String {
        let mut lines = Vec::new();
        if !header.is_empty() {
            lines.push(header.to_string());
        }

        lines.push(format!("<{} BAD LINKS>", self.error_count));
        dump_groups(&mut lines, &self.bad_links);

        lines.push(String::new());
        lines.push(format!("<{} MOVED LINKS>", self.moved_count));
        dump_groups(&mut lines, &self.moved_links);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

// A (trail, bookmark) pair lives in at most one of the two groupings;
// whichever classification came first keeps it
fn insert_unless_listed(target: &mut Groups, other: &Groups, bookmark: &BookmarkRef, trail: &Trail) {
    let key = trail.to_string();
    if other.get(&key).is_some_and(|links| links.contains(bookmark)) {
        return;
    }
    target.entry(key).or_default().insert(bookmark.clone());
}

fn dump_groups(lines: &mut Vec<String>, groups: &Groups) {
    for (trail, links) in groups {
        lines.push(format!("{} ({} link(s))", trail, links.len()));
        for link in links {
            lines.push(format!("\t{}\t[{}]", link.name, link.uri));
        }
    }
}
