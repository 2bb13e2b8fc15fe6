//! Error reporting for CGI scripts.
//!
//! # Data Flow
//! ```text
//! unhandled failure in a script
//!     → pages.rs (canned server-error / query-error HTML for the user)
//!     → report.rs (exception report appended to a log, stderr fallback)
//! ```
//!
//! # Design Decisions
//! - Keep this path as simple as possible; a failure while reporting a
//!   failure helps nobody
//! - The user-facing page never carries diagnostics, only the support
//!   address; details go to the exception report

pub mod pages;
pub mod report;

pub use pages::ErrorReporter;
pub use report::{dump, handle_error};
