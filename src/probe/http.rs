// src/probe/http.rs
// =============================================================================
// This module checks a single URL by making HTTP requests with hard deadlines.
//
// Key functionality:
// - Makes an HTTP HEAD request first (lightweight, no body download)
// - Retries with GET when HEAD gets 403/404/405 (some servers lie to HEAD)
// - Treats a 301/303/308 that only switches http -> https as fine (202)
// - Follows other redirects itself, up to a hop limit
// - Every attempt has its own deadline; running out of time gives 408
//
// Rust concepts:
// - tokio::spawn + tokio::time::timeout: run an attempt as a task and give up
//   on it after a deadline
// - JoinHandle::abort: really cancel the attempt (the socket gets dropped)
// =============================================================================

use super::Probe;
use crate::config::ValidatorConfig;
use crate::error::ProbeError;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

// What one HEAD or GET gave us back
#[derive(Debug)]
struct Attempt {
    code: u16,
    location: Option<String>,
}

impl Attempt {
    fn timed_out() -> Self {
        Self {
            code: StatusCode::REQUEST_TIMEOUT.as_u16(),
            location: None,
        }
    }
}

/// Probe backed by a real HTTP client.
///
/// Redirects are never followed by reqwest: the probe needs to see the 3xx
/// and its `Location` header to decide between "moved", "ok" and "follow".
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
    max_redirects: usize,
}

impl HttpProbe {
    pub fn new(config: &ValidatorConfig) -> Result<Self, ProbeError> {
        // One client for the whole run (connection pooling)
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self {
            client,
            timeout: config.timeout,
            max_redirects: config.max_redirects,
        })
    }

    // HEAD first, then GET if the HEAD answer is one servers are known to
    // get wrong. The GET result replaces the HEAD result.
    async fn attempt_with_fallback(&self, url: &Url) -> Result<Attempt, ProbeError> {
        let head = self.attempt(Method::HEAD, url).await?;
        if might_work_with_get(head.code) {
            debug!(%url, code = head.code, "HEAD rejected, retrying with GET");
            return self.attempt(Method::GET, url).await;
        }
        Ok(head)
    }

    // Runs one request as its own task so it can be cut off at the deadline
    //
    // Returns:
    //   Ok(Attempt) with the status (408 when the deadline passed)
    //   Err(Transport) for I/O failures like "connection refused"
    //   Err(Task) if the task itself died
    async fn attempt(&self, method: Method, url: &Url) -> Result<Attempt, ProbeError> {
        debug!(%method, %url, "probing");

        let request = self.client.request(method, url.clone());
        let mut task = tokio::spawn(async move {
            let response = request.send().await?;
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            // The response (and its body) is dropped here, closing the connection
            Ok::<_, reqwest::Error>(Attempt {
                code: response.status().as_u16(),
                location,
            })
        });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Err(_elapsed) => {
                task.abort();
                debug!(%url, timeout_ms = self.timeout.as_millis() as u64, "attempt timed out");
                Ok(Attempt::timed_out())
            }
            Ok(joined) => match joined? {
                Ok(attempt) => Ok(attempt),
                Err(e) if e.is_timeout() => Ok(Attempt::timed_out()),
                Err(e) => Err(ProbeError::Transport(e)),
            },
        }
    }
}

impl Probe for HttpProbe {
    async fn connect(&self, url: &Url) -> Result<u16, ProbeError> {
        let mut current = url.clone();
        let mut hops = 0;

        loop {
            let attempt = self.attempt_with_fallback(&current).await?;
            let code = attempt.code;

            if is_permanent_move(code)
                && attempt
                    .location
                    .as_deref()
                    .is_some_and(|location| is_secure_upgrade(&current, location))
            {
                debug!(url = %current, "redirect is only an upgrade to https, ignoring");
                return Ok(StatusCode::ACCEPTED.as_u16());
            }

            if !should_follow(code) {
                return Ok(code);
            }

            // Any other 3xx: go look at where it points, if it points somewhere new
            let next = match attempt
                .location
                .as_deref()
                .and_then(|location| current.join(location).ok())
            {
                Some(next) if !same_url(&current, &next) => next,
                _ => return Ok(code),
            };

            hops += 1;
            if hops > self.max_redirects {
                return Err(ProbeError::RedirectLoop {
                    url: url.to_string(),
                    hops: self.max_redirects,
                });
            }

            debug!(from = %current, to = %next, code, hops, "following redirect");
            current = next;
        }
    }
}

// Some sites answer 404 to HEAD but 200 to GET, others 405 to HEAD and 302 to
// GET. 403 shows up for HEAD on sites that block "bots".
fn might_work_with_get(code: u16) -> bool {
    matches!(code, 403 | 404 | 405)
}

fn is_permanent_move(code: u16) -> bool {
    matches!(code, 301 | 303 | 308)
}

// 3xx codes that the validator does not classify on its own
fn should_follow(code: u16) -> bool {
    (300..400).contains(&code) && !matches!(code, 301..=304 | 307 | 308)
}

// True when `location` is the same resource as `from`, just over https
fn is_secure_upgrade(from: &Url, location: &str) -> bool {
    let Ok(target) = from.join(location) else {
        return false;
    };

    from.scheme() == "http"
        && target.scheme() == "https"
        && from.host_str() == target.host_str()
        && from.port() == target.port()
        && from.path() == target.path()
        && from.query() == target.query()
}

// Case-only differences would otherwise send us round in circles
fn same_url(a: &Url, b: &Url) -> bool {
    a.as_str().eq_ignore_ascii_case(b.as_str())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why spawn a task for every request?
//    - tokio::time::timeout(d, fut) gives up waiting after d
//    - Awaiting a JoinHandle through timeout lets us stop waiting, and
//      task.abort() then drops the request future, which closes the socket
//    - So a server that never answers can't keep us (or a socket) busy
//
// 2. Why Policy::none() for redirects?
//    - reqwest would happily follow 301s for us and just hand back the 200
//    - We need to SEE the 301 to report a link as moved
//
// 3. What is `let ... else`?
//    - Pattern match that must succeed, otherwise the else block runs
//    - The else block has to leave the function (return, break, ...)
//
// 4. Why `&mut task` in timeout()?
//    - timeout() takes the future by value
//    - Passing &mut keeps the JoinHandle alive so we can abort() it afterwards
// -----------------------------------------------------------------------------
