//! Session-keyed file publishing.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Opaque handle for one publish session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Error type for the file-drop area.
#[derive(Debug, Error)]
pub enum DropError {
    /// The session was never created or has been closed.
    #[error("unknown file-drop session {0}")]
    UnknownSession(SessionId),

    /// A file name that would escape the session directory.
    #[error("invalid file name \"{0}\"")]
    BadFileName(String),

    #[error("filesystem error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Gateway for writing files to the public download area.
///
/// Each session owns one directory under the drop root. Files written
/// through the session land there with permissions opened so the web
/// server can serve them, and the matching URL under the public base
/// points users at the directory.
#[derive(Debug)]
pub struct DropBox {
    drop_path: PathBuf,
    base_url: String,
    group: Option<u32>,
    sessions: BTreeMap<SessionId, String>,
}

impl DropBox {
    /// Create a drop box over `drop_path`, published at `base_url`.
    ///
    /// When `group` is given, published files are handed to that gid.
    /// `base_url` should carry its trailing slash.
    pub fn new(
        drop_path: impl Into<PathBuf>,
        base_url: impl Into<String>,
        group: Option<u32>,
    ) -> Self {
        Self {
            drop_path: drop_path.into(),
            base_url: base_url.into(),
            group,
            sessions: BTreeMap::new(),
        }
    }

    /// Open a session: creates its directory and returns the id that
    /// all further calls need.
    pub fn create_session(&mut self) -> Result<SessionId, DropError> {
        let id = SessionId(Uuid::new_v4());
        let dir_name = id.to_string();
        let dir = self.drop_path.join(&dir_name);
        fs::create_dir(&dir).map_err(|source| DropError::Io { path: dir, source })?;
        self.sessions.insert(id, dir_name);
        tracing::debug!(session = %id, "file-drop session created");
        Ok(id)
    }

    /// Write every `name → contents` entry into the session directory.
    pub fn write_files(
        &self,
        id: SessionId,
        files: &BTreeMap<String, String>,
    ) -> Result<(), DropError> {
        let dir = self.session_dir(id)?;
        tracing::info!(session = %id, files = files.len(), "writing file-drop files");
        for (name, contents) in files {
            if !is_safe_name(name) {
                return Err(DropError::BadFileName(name.clone()));
            }
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| DropError::Io {
                path: path.clone(),
                source,
            })?;
            open_permissions(&path, self.group)?;
        }
        open_permissions(&dir, self.group)?;
        tracing::info!(session = %id, files = files.len(), "file-drop write complete");
        Ok(())
    }

    /// The public URL of the session directory.
    pub fn session_url(&self, id: SessionId) -> Result<String, DropError> {
        let dir_name = self
            .sessions
            .get(&id)
            .ok_or(DropError::UnknownSession(id))?;
        Ok(format!("{}{}/", self.base_url, dir_name))
    }

    /// Forget the session, preventing any further writes. Files already
    /// published stay on disk.
    pub fn close_session(&mut self, id: SessionId) -> Result<(), DropError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(DropError::UnknownSession(id))
    }

    fn session_dir(&self, id: SessionId) -> Result<PathBuf, DropError> {
        self.sessions
            .get(&id)
            .map(|name| self.drop_path.join(name))
            .ok_or(DropError::UnknownSession(id))
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && name != ".." && !name.contains('/') && !name.contains('\\')
}

#[cfg(unix)]
fn open_permissions(path: &Path, group: Option<u32>) -> Result<(), DropError> {
    use std::os::unix::fs::PermissionsExt;

    let io_err = |source| DropError::Io {
        path: path.to_owned(),
        source,
    };
    fs::set_permissions(path, fs::Permissions::from_mode(0o777)).map_err(io_err)?;
    if let Some(gid) = group {
        std::os::unix::fs::chown(path, None, Some(gid)).map_err(io_err)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn open_permissions(_path: &Path, _group: Option<u32>) -> Result<(), DropError> {
    Ok(())
}
