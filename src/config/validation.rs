//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check URLs are usable before anything tries to fetch them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::SiteConfig;

/// One semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check everything serde cannot, collecting every problem found.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "fetch.timeout_secs",
            "must be greater than zero",
        ));
    }

    if !config.webshare.base_url.is_empty() {
        match Url::parse(&config.webshare.base_url) {
            Ok(url) if url.host_str().is_none() => {
                errors.push(ValidationError::new(
                    "webshare.base_url",
                    "has no host to connect to",
                ));
            }
            Ok(_) => {}
            Err(err) => {
                errors.push(ValidationError::new(
                    "webshare.base_url",
                    format!("not a valid URL: {}", err),
                ));
            }
        }
    }

    if config.webshare.rcd_path.is_empty() {
        errors.push(ValidationError::new("webshare.rcd_path", "must not be empty"));
    }

    if config.filedrop.drop_path.is_empty() {
        errors.push(ValidationError::new("filedrop.drop_path", "must not be empty"));
    }
    if !config.filedrop.base_url.is_empty() && !config.filedrop.base_url.ends_with('/') {
        // session URLs are built by appending the directory name
        errors.push(ValidationError::new(
            "filedrop.base_url",
            "must end with a slash",
        ));
    }

    if config.templates.dir.is_empty() {
        errors.push(ValidationError::new("templates.dir", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SiteConfig::default();
        config.fetch.timeout_secs = 0;
        config.webshare.base_url = "not a url".to_owned();
        config.filedrop.base_url = "http://localhost/ftp".to_owned();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["fetch.timeout_secs", "webshare.base_url", "filedrop.base_url"]
        );
    }

    #[test]
    fn hostless_webshare_url_is_rejected() {
        let mut config = SiteConfig::default();
        config.webshare.base_url = "data:text/plain,oops".to_owned();
        assert!(validate_config(&config).is_err());
    }
}
