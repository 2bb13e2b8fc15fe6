//! Error types for page retrieval.

use thiserror::Error;

/// The fetcher was pointed at a URL it cannot use.
///
/// This is a configuration error, not a runtime condition: it comes out
/// of constructors and mutators, never out of a fetch itself.
#[derive(Debug, Error)]
pub enum UrlError {
    /// The URL parsed but contains no host to connect to.
    #[error("Cannot find server in the given URL")]
    NoHost,

    /// The URL could not be parsed at all.
    #[error("Cannot parse the given URL: {0}")]
    Malformed(#[from] url::ParseError),
}

/// A failed page retrieval.
///
/// Returned as a value from [`PageFetcher::get_page`] so callers can
/// branch on the failure kind instead of catching anything.
///
/// [`PageFetcher::get_page`]: crate::fetch::PageFetcher::get_page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The deadline elapsed before the full response arrived.
    #[error("Connection timed out")]
    TimedOut,

    /// No connection could be established: refused, unreachable, or an
    /// unresolvable host.
    #[error("Could not connect to {0}")]
    ConnectionRefused(String),

    /// The connection opened but reading the response failed.
    #[error("Problem reading from {0}")]
    Read(String),

    /// Anything else that went wrong during the attempt.
    #[error("Unexpected error")]
    Unexpected,
}
