//! Form content processing.
//!
//! # Data Flow
//! ```text
//! urlencoded form content (the caller reads it from the request)
//!     → parse.rs (decode pairs, resolve "type:name" keys, type values)
//!     → operator rewriting (begins/ends/contains → like, not: negation)
//!     → FormContent: map of Field { name, op, value }
//! ```
//!
//! # Design Decisions
//! - Keys carry their type as a prefix ("int:limit"); bare keys fall
//!   back to a caller-supplied default-type map
//! - Empty values mean "field not filled in" and are skipped
//! - Operators come out ready for condition generation; callers never
//!   see begins/ends/contains

pub mod field;
pub mod parse;

pub use field::{Field, FieldType, FieldValue};
pub use parse::{parse, FieldDefault, FormContent, FormError};
