//! Standard page templating.
//!
//! # Data Flow
//! ```text
//! template directory (head / body-start / body-stop fragments)
//!     → page.rs (Page builder: title, css, scripts, header bar, body)
//!     → navigation() / header_bar() / full_document()
//!     → complete HTML document as a string
//! ```
//!
//! # Design Decisions
//! - Fragments are read at assembly time, not construction time, so a
//!   long-lived Page picks up edited templates
//! - Assembly is string concatenation in a fixed order; only fragment
//!   reads can fail

pub mod page;

pub use page::{Page, TemplateError};
