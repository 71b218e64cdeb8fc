// src/lib.rs
// =============================================================================
// Library root for bookmark link validation.
//
// Before bookmarks are exported, each link can be checked to see whether it
// is still alive. This crate contains:
// - probe: bounded-time HTTP probing (HEAD, GET fallback, redirects)
// - validator: per-bookmark classification and the grouped report
// - bookmarks: a small JSON bookmark tree and a walker that prunes bad links
//
// The binary in src/main.rs is just one caller of this library; an exporter
// would use LinkValidator the same way.
// =============================================================================

pub mod bookmarks;
pub mod config;
pub mod error;
pub mod probe;
pub mod validator;

pub use config::ValidatorConfig;
pub use error::{ProbeError, ValidationError};
pub use probe::{HttpProbe, Probe};
pub use validator::{
    BookmarkRef, FailureReason, LinkValidator, ProbeOutcome, Trail, ValidationReport,
};
