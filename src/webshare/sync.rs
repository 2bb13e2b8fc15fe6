//! Refreshing the local component definitions from the webshare
//! product.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::fetch::{FetchError, PageFetcher, UrlError};

/// First line of every generated file.
pub const BANNER: &str = "# Note: This file is machine-generated, do not edit!";

/// CGI endpoint serving the component definitions.
const COMPONENTS_ENDPOINT: &str = "components.cgi?format=rcd";

/// Error type for the sync operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The configured base URL is unusable.
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Errors occurred when reading from webshare product: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Download the component definitions from the webshare product at
/// `base_url` and rewrite `file_path` with them.
///
/// The response may carry its HTTP headers in-band; everything through
/// the first blank line is dropped before writing. The local file gets
/// [`BANNER`] as its first line.
pub async fn save_webshare(
    file_path: &Path,
    base_url: &str,
    timeout: Duration,
) -> Result<(), SyncError> {
    let url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        COMPONENTS_ENDPOINT
    );
    let fetcher = PageFetcher::new(&url, BTreeMap::new(), timeout)?;
    let lines = fetcher.get_page().await?;

    let mut lines: Vec<String> = lines.iter().map(|line| line.trim().to_owned()).collect();
    if let Some(pos) = lines.iter().position(String::is_empty) {
        lines = lines.split_off(pos + 1);
    }

    let mut contents = String::from(BANNER);
    contents.push('\n');
    for line in &lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(file_path, contents).map_err(|source| SyncError::Io {
        path: file_path.to_owned(),
        source,
    })?;

    tracing::info!(
        path = %file_path.display(),
        lines = lines.len(),
        "webshare file updated"
    );
    Ok(())
}
