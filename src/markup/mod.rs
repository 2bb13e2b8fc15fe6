//! HTML production helpers.
//!
//! # Data Flow
//! ```text
//! curated text with informal markers
//!     → scanner.rs (">x<" / "<x>" spans become <SUB>/<SUP> pairs,
//!       strays become entities)
//!
//! arbitrary text
//!     → escape.rs (&, <, > become SGML entities)
//!
//! page fragments
//!     → elements.rs (canned elements and form sections as strings)
//! ```
//!
//! # Design Decisions
//! - The scanner tracks one pending marker per kind; a repeat escapes
//!   the earlier one instead of stacking (spans never nest)
//! - Builders return strings; writing them anywhere is the caller's job

pub mod elements;
pub mod escape;
pub mod scanner;

pub use escape::escape;
pub use scanner::{sub_sup, sub_sup_lines};
