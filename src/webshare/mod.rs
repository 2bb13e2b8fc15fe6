//! Shared web components.
//!
//! # Data Flow
//! ```text
//! webshare product (remote)
//!     → sync.rs (fetch components.cgi?format=rcd, strip headers,
//!       rewrite the local rcd file)
//!
//! local rcd file
//!     → rcd.rs (record parser)
//!     → components.rs (SharedComponents registry)
//!     → IMG / LINK tags for pages
//! ```
//!
//! # Design Decisions
//! - Names and aliases share one namespace; duplicates fail loading
//!   rather than silently shadowing
//! - The registry re-reads nothing after load except the raw file on
//!   explicit request

pub mod components;
pub mod rcd;
pub mod sync;

pub use components::{SharedComponent, SharedComponents, WebshareError};
pub use rcd::{Rcd, RcdError, RcdFile};
pub use sync::{save_webshare, SyncError, BANNER};
