// src/probe/mod.rs
// =============================================================================
// This module turns a URL into an HTTP status code without ever hanging.
//
// Submodules:
// - http: the reqwest-backed probe (HEAD, GET fallback, redirect hops)
//
// The Probe trait is the seam LinkValidator talks to, so the validator can be
// driven by something other than the real network (tests count calls on it).
// =============================================================================

mod http;

use crate::error::ProbeError;
use std::future::Future;
use url::Url;

pub use http::HttpProbe;

/// Something that can answer "what status does this URL give?".
pub trait Probe {
    /// Returns the final HTTP status for `url`.
    ///
    /// 408 means the attempt ran out of time. A permanent redirect that only
    /// upgrades http to https comes back as 202.
    fn connect(&self, url: &Url) -> impl Future<Output = Result<u16, ProbeError>> + Send;
}
