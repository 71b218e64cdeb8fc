// src/config.rs
// =============================================================================
// Settings for a validation run.
//
// There is no config file: the CLI maps its flags onto ValidatorConfig and
// library callers build one directly (or take the defaults).
// =============================================================================

use std::time::Duration;

/// Default deadline for a single network attempt.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default number of redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

// Some sites answer 403 to anything that doesn't look like a browser
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// When false, every link is kept without any network traffic
    pub enabled: bool,
    /// Connect + read deadline for each attempt (HEAD, GET retry, each hop)
    pub timeout: Duration,
    /// Redirect hops allowed before a link counts as a redirect loop
    pub max_redirects: usize,
    pub user_agent: String,
}

impl ValidatorConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert!(config.enabled);
        assert_eq!(config.timeout, Duration::from_millis(3000));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_disabled_keeps_other_defaults() {
        let config = ValidatorConfig::disabled().with_timeout(Duration::from_millis(50));
        assert!(!config.enabled);
        assert_eq!(config.timeout, Duration::from_millis(50));
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }
}
