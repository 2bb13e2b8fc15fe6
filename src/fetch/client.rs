//! Reusable page fetcher with a per-call deadline.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::fetch::error::{FetchError, UrlError};

/// How long to wait for a page before giving up, unless told otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Sent with every request. Some of the CGI scripts we talk to refuse
/// clients that do not present a browser-looking agent string.
const USER_AGENT: &str = "Mozilla";

/// Retrieve a single page with one call.
///
/// Convenience wrapper over [`PageFetcher`] for callers that do not need
/// to reuse the fetcher. The outer `Result` carries the configuration
/// error (unusable URL); the inner one is the fetch outcome.
///
/// ```no_run
/// # use std::collections::BTreeMap;
/// # use web_support::fetch::get_url;
/// # async fn demo() {
/// let mut parms = BTreeMap::new();
/// parms.insert("query".to_owned(), "04622".to_owned());
/// let outcome = get_url(
///     "http://www.wunderground.com/cgi-bin/findweather/getForecast",
///     parms,
///     std::time::Duration::from_secs(60),
/// )
/// .await
/// .expect("valid URL");
/// # let _ = outcome;
/// # }
/// ```
pub async fn get_url(
    url: &str,
    parms: BTreeMap<String, String>,
    timeout: Duration,
) -> Result<Result<Vec<String>, FetchError>, UrlError> {
    let fetcher = PageFetcher::new(url, parms, timeout)?;
    Ok(fetcher.get_page().await)
}

/// Retrieves pages over HTTP within a caller-chosen timeframe.
///
/// A fetcher holds a base URL, a set of GET parameters, and a timeout.
/// All three may be changed between calls, and each call to
/// [`get_page`](Self::get_page) uses only the configuration current at
/// that moment:
///
/// ```no_run
/// # use std::collections::BTreeMap;
/// # use std::time::Duration;
/// # use web_support::fetch::PageFetcher;
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut parms = BTreeMap::new();
/// parms.insert("_Marker_key".to_owned(), "3".to_owned());
/// let mut fetcher = PageFetcher::new(
///     "http://kelso/dev/searches/allele_report",
///     parms,
///     Duration::from_secs(60),
/// )?;
/// let alleles = fetcher.get_page().await;
///
/// fetcher.set_base_url("http://kelso/dev/searches/probe_report.cgi")?;
/// let probes = fetcher.get_page().await;
/// # let _ = (alleles, probes);
/// # Ok(())
/// # }
/// ```
///
/// The deadline is private to each call. Concurrent fetchers on separate
/// tasks never interfere with one another's timeouts.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: reqwest::Client,
    base_url: String,
    server: String,
    parms: BTreeMap<String, String>,
    timeout: Duration,
}

impl PageFetcher {
    /// Create a fetcher for the given URL.
    ///
    /// Fails when no server can be located within `base_url`.
    pub fn new(
        base_url: &str,
        parms: BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Self, UrlError> {
        let mut fetcher = Self {
            http: reqwest::Client::new(),
            base_url: String::new(),
            server: String::new(),
            parms,
            timeout,
        };
        fetcher.set_base_url(base_url)?;
        Ok(fetcher)
    }

    /// Create a fetcher with no parameters and the default timeout.
    pub fn for_url(base_url: &str) -> Result<Self, UrlError> {
        Self::new(base_url, BTreeMap::new(), DEFAULT_TIMEOUT)
    }

    /// Point subsequent fetches at a different URL.
    ///
    /// Fails when no server can be located within `base_url`, in which
    /// case the previous configuration is left untouched.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), UrlError> {
        let parsed = Url::parse(base_url)?;
        let server = parsed.host_str().ok_or(UrlError::NoHost)?;
        self.server = server.to_owned();
        self.base_url = base_url.to_owned();
        Ok(())
    }

    /// Set the value of a single GET parameter.
    pub fn set_parm(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parms.insert(name.into(), value.into());
    }

    /// Replace the GET parameters wholesale.
    pub fn set_parms(&mut self, parms: BTreeMap<String, String>) {
        self.parms = parms;
    }

    /// Set the deadline for subsequent fetches.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The server this fetcher expects to connect to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// The URL of the page this fetcher expects to read, minus any GET
    /// parameters.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The value of the GET parameter `name`, if one is set.
    pub fn parm(&self, name: &str) -> Option<&str> {
        self.parms.get(name).map(String::as_str)
    }

    /// All GET parameters this fetcher knows about.
    pub fn parms(&self) -> &BTreeMap<String, String> {
        &self.parms
    }

    /// The current deadline setting.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retrieve the page named by the current configuration.
    ///
    /// On success the response body comes back as an ordered list of
    /// lines. Every failure mode is reported as a [`FetchError`] value;
    /// no partial body is ever returned.
    pub async fn get_page(&self) -> Result<Vec<String>, FetchError> {
        match tokio::time::timeout(self.timeout, self.read_lines()).await {
            Ok(Ok(lines)) => {
                tracing::debug!(
                    server = %self.server,
                    lines = lines.len(),
                    "page retrieved"
                );
                Ok(lines)
            }
            Ok(Err(err)) => {
                let failure = self.classify(err);
                tracing::warn!(server = %self.server, %failure, "page fetch failed");
                Err(failure)
            }
            Err(_elapsed) => {
                tracing::warn!(
                    server = %self.server,
                    timeout_secs = self.timeout.as_secs(),
                    "page fetch hit deadline"
                );
                Err(FetchError::TimedOut)
            }
        }
    }

    async fn read_lines(&self) -> Result<Vec<String>, reqwest::Error> {
        let mut request = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if !self.parms.is_empty() {
            request = request.query(&self.parms);
        }
        let body = request.send().await?.text().await?;
        Ok(body.lines().map(str::to_owned).collect())
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::TimedOut
        } else if err.is_connect() {
            FetchError::ConnectionRefused(self.server.clone())
        } else if err.is_body() || err.is_decode() {
            FetchError::Read(self.server.clone())
        } else {
            FetchError::Unexpected
        }
    }
}
