// src/validator/mod.rs
// =============================================================================
// This module decides, per bookmark, whether a link is worth keeping.
//
// Submodules:
// - trail: BookmarkRef and Trail (where in the tree a bookmark lives)
// - outcome: ProbeOutcome / FailureReason and the status code table
// - report: the grouped bad/moved listing built up during a run
// - tester: LinkValidator, which ties it all together
// =============================================================================

mod outcome;
mod report;
mod tester;
mod trail;

pub use outcome::{FailureReason, ProbeOutcome};
pub use report::ValidationReport;
pub use tester::LinkValidator;
pub use trail::{BookmarkRef, Trail, TRAIL_SEPARATOR};
