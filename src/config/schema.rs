//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! web support tools. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the web support tools.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Page-fetch settings.
    pub fetch: FetchConfig,

    /// Shared web-component settings.
    pub webshare: WebshareConfig,

    /// Public file-drop area settings.
    pub filedrop: FiledropConfig,

    /// Page template settings.
    pub templates: TemplateConfig,

    /// Error page settings.
    pub error_page: ErrorPageConfig,
}

/// Page-fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Seconds to wait for a remote page before giving up.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

/// Shared web-component configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebshareConfig {
    /// Base URL of the webshare product.
    pub base_url: String,

    /// Where the local copy of the component definitions lives.
    pub rcd_path: String,
}

impl Default for WebshareConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            rcd_path: "data/webshare.rcd".to_owned(),
        }
    }
}

/// Public file-drop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FiledropConfig {
    /// Directory that session directories are created under.
    pub drop_path: String,

    /// Public URL of that directory, with trailing slash.
    pub base_url: String,

    /// Numeric gid applied to published files, when set.
    pub group: Option<u32>,
}

impl Default for FiledropConfig {
    fn default() -> Self {
        Self {
            drop_path: "ftp/".to_owned(),
            base_url: "http://localhost/ftp/".to_owned(),
            group: None,
        }
    }
}

/// Page template configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding the template fragments.
    pub dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: "templates/".to_owned(),
        }
    }
}

/// Error page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorPageConfig {
    /// Page title used on error pages.
    pub title: String,

    /// Address users are asked to report problems to.
    pub support_email: String,

    /// Where exception reports are appended; stderr when unset.
    pub log_path: Option<String>,
}

impl Default for ErrorPageConfig {
    fn default() -> Self {
        Self {
            title: "Site".to_owned(),
            support_email: "webmaster@localhost".to_owned(),
            log_path: None,
        }
    }
}
