// src/validator/tester.rs
// =============================================================================
// LinkValidator: one call per bookmark, answers "keep this link?".
//
// Steps for a single test():
// 1. Parse the URI            -> bad link if it doesn't parse
// 2. Look up the host in DNS  -> bad link if it doesn't resolve
// 3. Plain http only: probe   -> ok / moved / bad / inconclusive
// 4. Anything else (https, ftp, mailto, ...) with a good host is kept as is
//
// Nothing that goes wrong for one bookmark is allowed to escape test(): the
// worst case is a logged error and a `false` verdict.
// =============================================================================

use super::outcome::{FailureReason, ProbeOutcome};
use super::report::ValidationReport;
use super::trail::{BookmarkRef, Trail};
use crate::config::ValidatorConfig;
use crate::error::{ProbeError, Result};
use crate::probe::{HttpProbe, Probe};
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::{debug, error, warn};
use url::{Host, Url};

pub struct LinkValidator<P = HttpProbe> {
    enabled: bool,
    probe: P,
    dns_timeout: Duration,
    report: ValidationReport,
}

impl LinkValidator<HttpProbe> {
    /// Validator that probes the real network
    pub fn new(config: &ValidatorConfig) -> std::result::Result<Self, ProbeError> {
        let probe = HttpProbe::new(config)?;
        Ok(Self::with_probe(config, probe))
    }
}

impl<P: Probe> LinkValidator<P> {
    pub fn with_probe(config: &ValidatorConfig, probe: P) -> Self {
        Self {
            enabled: config.enabled,
            probe,
            dns_timeout: config.timeout,
            report: ValidationReport::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }

    pub fn error_count(&self) -> usize {
        self.report.error_count()
    }

    pub fn moved_count(&self) -> usize {
        self.report.moved_count()
    }

    pub fn dump(&self, header: &str) -> String {
        self.report.dump(header)
    }

    /// Checks one bookmark and records it if it is bad or moved.
    ///
    /// Returns whether the link should be kept. When validation is disabled
    /// every link is kept and nothing is looked at.
    pub async fn test(&mut self, bookmark: &BookmarkRef, trail: &Trail) -> bool {
        if !self.enabled {
            return true;
        }

        match self.evaluate(bookmark, trail).await {
            Ok(outcome) => self.record(bookmark, trail, outcome),
            Err(e) => {
                error!(
                    "Unable to verify link: {} ({}) [{}]",
                    bookmark.uri, trail, e
                );
                false
            }
        }
    }

    // Classifies without touching the report. Err is reserved for failures
    // nobody expected (a crashed probe task); everything else is an outcome.
    async fn evaluate(&self, bookmark: &BookmarkRef, trail: &Trail) -> Result<ProbeOutcome> {
        let url = match Url::parse(&bookmark.uri) {
            Ok(url) => url,
            Err(e) => {
                debug!(uri = %bookmark.uri, error = %e, "unparseable URI");
                return Ok(ProbeOutcome::Failed(FailureReason::BadUri));
            }
        };

        debug!("{}: testing host '{}' ({}) ...", bookmark.name, url.host_str().unwrap_or(""), trail);
        if !self.resolve_host(&url).await {
            return Ok(ProbeOutcome::Failed(FailureReason::UnknownHost));
        }

        // Only plain http gets the full treatment
        if !url.scheme().eq_ignore_ascii_case("http") {
            return Ok(ProbeOutcome::Ok);
        }

        debug!("{}: testing URL '{}' ({}) ...", bookmark.name, url, trail);
        match self.probe.connect(&url).await {
            Ok(code) => Ok(ProbeOutcome::from_status(code)),
            Err(ProbeError::RedirectLoop { hops, .. }) => {
                Ok(ProbeOutcome::Failed(FailureReason::RedirectLoop(hops)))
            }
            Err(ProbeError::Transport(e)) => Ok(ProbeOutcome::InconclusiveKeep(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    // Hosts that are IP literals count as resolved, and so do URIs that have
    // no host at all (mailto:, file:///...)
    async fn resolve_host(&self, url: &Url) -> bool {
        let domain = match url.host() {
            Some(Host::Domain(domain)) => domain,
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) | None => return true,
        };
        let port = url.port_or_known_default().unwrap_or(80);

        match tokio::time::timeout(self.dns_timeout, lookup_host((domain, port))).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                debug!(host = domain, error = %e, "host lookup failed");
                false
            }
            Err(_) => {
                debug!(host = domain, "host lookup timed out");
                false
            }
        }
    }

    fn record(&mut self, bookmark: &BookmarkRef, trail: &Trail, outcome: ProbeOutcome) -> bool {
        match &outcome {
            ProbeOutcome::Ok => {}
            ProbeOutcome::Moved(code) => {
                warn!(
                    "URL moved ({}): {} => {} ({})",
                    code, bookmark.name, bookmark.uri, trail
                );
                self.report.record_moved(bookmark, trail);
            }
            ProbeOutcome::Failed(reason) => {
                warn!("{}: {} => {} ({})", reason, bookmark.name, bookmark.uri, trail);
                self.report.record_bad(bookmark, trail);
            }
            ProbeOutcome::InconclusiveKeep(message) => {
                warn!(
                    "Cannot verify link: {} => {} ({}) [{}]",
                    bookmark.name, bookmark.uri, trail, message
                );
            }
        }
        outcome.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone, Copy)]
    enum Script {
        Status(u16),
        Loop,
        Crash,
    }

    // Probe that answers from a script and counts how often it was asked
    struct ScriptedProbe {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Probe for ScriptedProbe {
        async fn connect(&self, url: &Url) -> std::result::Result<u16, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Script::Status(code) => Ok(code),
                Script::Loop => Err(ProbeError::RedirectLoop {
                    url: url.to_string(),
                    hops: 10,
                }),
                Script::Crash => {
                    let join_err = tokio::spawn(async { panic!("probe crashed") })
                        .await
                        .unwrap_err();
                    Err(ProbeError::Task(join_err))
                }
            }
        }
    }

    fn scripted(script: Script) -> LinkValidator<ScriptedProbe> {
        LinkValidator::with_probe(&ValidatorConfig::default(), ScriptedProbe::new(script))
    }

    fn real() -> LinkValidator {
        LinkValidator::new(&ValidatorConfig::default()).unwrap()
    }

    fn trail() -> Trail {
        Trail::root("Bookmarks").child("Tools")
    }

    #[tokio::test]
    async fn test_disabled_is_pass_through() {
        let config = ValidatorConfig::disabled();
        let mut validator =
            LinkValidator::with_probe(&config, ScriptedProbe::new(Script::Status(500)));

        for uri in ["not a uri", "http://nowhere.invalid/", "http://127.0.0.1/"] {
            assert!(validator.test(&BookmarkRef::new("x", uri), &trail()).await);
        }

        assert_eq!(validator.error_count(), 0);
        assert_eq!(validator.moved_count(), 0);
        assert_eq!(validator.probe().calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_uri() {
        let mut validator = scripted(Script::Status(200));
        let bookmark = BookmarkRef::new("Broken", "not a uri");

        assert!(!validator.test(&bookmark, &trail()).await);
        assert_eq!(validator.error_count(), 1);
        assert!(validator.report().bad_links()["Bookmarks -- Tools"].contains(&bookmark));
        assert_eq!(validator.probe().calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_host() {
        let mut validator = scripted(Script::Status(200));
        let bookmark = BookmarkRef::new("Gone", "http://no-such-host.invalid/page");

        assert!(!validator.test(&bookmark, &trail()).await);
        assert_eq!(validator.error_count(), 1);
        assert!(validator.report().bad_links()["Bookmarks -- Tools"].contains(&bookmark));
        assert_eq!(validator.probe().calls(), 0);
    }

    #[tokio::test]
    async fn test_non_http_schemes_are_not_probed() {
        let mut validator = scripted(Script::Status(500));

        for uri in ["https://127.0.0.1/", "mailto:someone@example.com", "ftp://127.0.0.1/pub"] {
            assert!(validator.test(&BookmarkRef::new("x", uri), &trail()).await, "{uri}");
        }

        assert_eq!(validator.probe().calls(), 0);
        assert!(validator.report().is_clean());
    }

    #[tokio::test]
    async fn test_status_codes_map_to_verdicts() {
        let cases = [
            (200, true, 0, 0),
            (302, true, 0, 0),
            (301, true, 0, 1),
            (308, true, 0, 1),
            (408, false, 1, 0),
            (500, false, 1, 0),
        ];

        for (code, keep, errors, moved) in cases {
            let mut validator = scripted(Script::Status(code));
            let verdict = validator
                .test(&BookmarkRef::new("x", "http://127.0.0.1/"), &trail())
                .await;

            assert_eq!(verdict, keep, "{code}");
            assert_eq!(validator.error_count(), errors, "{code}");
            assert_eq!(validator.moved_count(), moved, "{code}");
            assert_eq!(validator.probe().calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_redirect_loop_is_bad() {
        let mut validator = scripted(Script::Loop);
        assert!(
            !validator
                .test(&BookmarkRef::new("Loop", "http://127.0.0.1/a"), &trail())
                .await
        );
        assert_eq!(validator.error_count(), 1);
    }

    #[tokio::test]
    async fn test_crashed_probe_is_dropped_but_not_recorded() {
        let mut validator = scripted(Script::Crash);
        assert!(
            !validator
                .test(&BookmarkRef::new("Crash", "http://127.0.0.1/"), &trail())
                .await
        );
        assert!(validator.report().is_clean());
    }

    #[tokio::test]
    async fn test_repeated_failure_counts_every_call() {
        let mut validator = scripted(Script::Status(404));
        let bookmark = BookmarkRef::new("Dead", "http://127.0.0.1/dead");

        validator.test(&bookmark, &trail()).await;
        validator.test(&bookmark, &trail()).await;

        // Counted twice, listed once
        assert_eq!(validator.error_count(), 2);
        assert_eq!(validator.report().bad_links()["Bookmarks -- Tools"].len(), 1);
    }

    #[tokio::test]
    async fn test_live_link_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut validator = real();
        let bookmark = BookmarkRef::new("Live", format!("{}/", server.uri()));

        assert!(validator.test(&bookmark, &trail()).await);
        assert!(validator.report().is_clean());
    }

    #[tokio::test]
    async fn test_head_404_get_200_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut validator = real();
        let bookmark = BookmarkRef::new("Picky", format!("{}/sdg/", server.uri()));

        assert!(validator.test(&bookmark, &trail()).await);
        assert!(validator.report().is_clean());
    }

    #[tokio::test]
    async fn test_moved_link_is_kept_and_flagged() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", "http://new-home.example/"),
            )
            .mount(&server)
            .await;

        let mut validator = real();
        let bookmark = BookmarkRef::new("Moved", format!("{}/old", server.uri()));

        assert!(validator.test(&bookmark, &trail()).await);
        assert_eq!(validator.moved_count(), 1);
        assert_eq!(validator.error_count(), 0);
        assert!(validator.report().moved_links()["Bookmarks -- Tools"].contains(&bookmark));
    }

    #[tokio::test]
    async fn test_https_upgrade_is_ok() {
        let server = MockServer::start().await;
        let secure = server.uri().replacen("http://", "https://", 1) + "/page";
        Mock::given(method("HEAD"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", secure.as_str()))
            .mount(&server)
            .await;

        let mut validator = real();
        let bookmark = BookmarkRef::new("Upgraded", format!("{}/page", server.uri()));

        assert!(validator.test(&bookmark, &trail()).await);
        assert!(validator.report().is_clean());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_link() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut validator = real();
        let bookmark = BookmarkRef::new("Refused", format!("http://{addr}/"));

        // Can't reach the server: keep the link, record nothing
        assert!(validator.test(&bookmark, &trail()).await);
        assert_eq!(validator.error_count(), 0);
        assert_eq!(validator.moved_count(), 0);
    }
}
