//! Publishing result files to the public download area.
//!
//! # Data Flow
//! ```text
//! create_session()
//!     → uniquely named directory under the drop root
//! write_files(session, name → contents)
//!     → files written into the session directory
//!     → permissions opened so the web server can hand them out
//! session_url(session)
//!     → public URL for the user to collect their files
//! close_session(session)
//!     → no further writes; published files stay on disk
//! ```
//!
//! # Design Decisions
//! - Session ids are UUIDs, which also name the directories; no
//!   collision loop needed
//! - Permissions are set with direct filesystem calls, not shell-outs
//! - File names are validated so a session can only write inside its
//!   own directory

pub mod dropbox;

pub use dropbox::{DropBox, DropError, SessionId};
