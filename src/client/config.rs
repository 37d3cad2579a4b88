//! Configuration for the HTTP jobs client.

use std::time::Duration;

use reqwest::Url;

use crate::error::{JobsError, Result};

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "JOB_BOARD_API_URL";
/// Environment variable holding the request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "JOB_BOARD_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Where the jobs API lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address; `jobs/` is resolved against it.
    pub base_url: String,
    /// Total time allowed for one request.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `JOB_BOARD_API_URL` and `JOB_BOARD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                JobsError::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(JobsError::Config("timeout must be greater than 0".into()));
        }
        if self.connect_timeout.is_zero() {
            return Err(JobsError::Config(
                "connect timeout must be greater than 0".into(),
            ));
        }
        self.parsed_base_url().map(|_| ())
    }

    /// The base URL with its path ending in `/`, so relative joins append to it.
    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            JobsError::Config(format!("invalid base url {:?}: {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(JobsError::Config(format!(
                "base url must use http or https, got {:?}",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://jobs.example.com/api"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://jobs.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_env_keeps_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, JobsError::Config(_)));

        let err = ClientConfig::new()
            .with_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, JobsError::Config(_)));
    }

    #[test]
    fn rejects_unusable_urls() {
        for url in ["not a url", "ftp://example.com", ""] {
            let err = ClientConfig::new().with_base_url(url).validate().unwrap_err();
            assert!(matches!(err, JobsError::Config(_)), "{url}");
        }
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = ClientConfig::new()
            .with_base_url("http://host:8080/api")
            .parsed_base_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://host:8080/api/");

        let url = ClientConfig::new()
            .with_base_url("http://host:8080")
            .parsed_base_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://host:8080/");
    }
}
