// src/error.rs
// =============================================================================
// Error types for the library.
//
// None of these ever reach the code walking the bookmark tree:
// LinkValidator::test turns every one of them into a keep/drop verdict.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// Could not build the HTTP client
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Low-level I/O failure while talking to the server (refused, reset, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Redirect chain longer than the configured hop limit
    #[error("Too many redirects ({hops}) starting at {url}")]
    RedirectLoop { url: String, hops: usize },

    /// The spawned attempt panicked or was cancelled unexpectedly
    #[error("Probe task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unexpected probe failure: {0}")]
    Probe(#[from] ProbeError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
