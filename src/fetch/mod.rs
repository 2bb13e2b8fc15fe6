//! Bounded page retrieval over HTTP.
//!
//! # Data Flow
//! ```text
//! caller configuration (URL, GET parameters, timeout)
//!     → client.rs (encode request, arm per-call deadline)
//!     → remote server
//!     → response body split into lines
//!     → Ok(lines) | FetchError returned as a value
//! ```
//!
//! # Design Decisions
//! - Every fetch runs under its own deadline; nothing is shared between
//!   concurrent fetchers and nothing can fire after a call returns
//! - Runtime failures come back as data so callers can branch on them;
//!   only an unusable URL is a hard error, raised at configuration time
//! - No retries and no backoff at this layer; callers loop if they want

pub mod client;
pub mod error;

pub use client::{get_url, PageFetcher, DEFAULT_TIMEOUT};
pub use error::{FetchError, UrlError};
