// src/validator/outcome.rs
// =============================================================================
// What checking one link can end in.
//
// HTTP status codes, as the validator reads them:
// - 200, 202, 302, 304, 307: fine (302/307 are usually temporary redirects)
// - 301, 303, 308: permanently moved, still kept but flagged
// - 408: no answer in time
// - anything else: unresolved
// =============================================================================

use std::fmt;

/// Why a link ended up in the bad links list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The URI could not be parsed
    BadUri,
    /// DNS lookup of the host failed
    UnknownHost,
    /// No response within the configured deadline (or the server sent 408)
    Timeout,
    /// A status code that is neither fine nor a permanent move
    UnresolvedStatus(u16),
    /// Redirects went on for longer than the hop limit
    RedirectLoop(usize),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::BadUri => write!(f, "Bad URI"),
            FailureReason::UnknownHost => write!(f, "Unknown host"),
            FailureReason::Timeout => write!(f, "Timeout on link (408)"),
            FailureReason::UnresolvedStatus(code) => write!(f, "Unresolved link ({code})"),
            FailureReason::RedirectLoop(hops) => write!(f, "Redirect loop (>{hops} hops)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ok,
    Moved(u16),
    Failed(FailureReason),
    /// The server could not be talked to at all (refused, reset, ...).
    /// A flaky network is no reason to throw a bookmark away, so the link is
    /// kept and nothing is recorded.
    InconclusiveKeep(String),
}

impl ProbeOutcome {
    pub fn from_status(code: u16) -> Self {
        match code {
            200 | 202 | 302 | 304 | 307 => ProbeOutcome::Ok,
            301 | 303 | 308 => ProbeOutcome::Moved(code),
            408 => ProbeOutcome::Failed(FailureReason::Timeout),
            _ => ProbeOutcome::Failed(FailureReason::UnresolvedStatus(code)),
        }
    }

    /// The verdict handed back to the tree walker
    pub fn keep(&self) -> bool {
        !matches!(self, ProbeOutcome::Failed(_))
    }
}
