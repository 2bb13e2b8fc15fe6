//! The shared-component registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::webshare::rcd::{RcdError, RcdFile};

/// Error type for registry loading.
#[derive(Debug, Error)]
pub enum WebshareError {
    #[error("Error in {path}: {source}")]
    Rcd {
        path: PathBuf,
        #[source]
        source: RcdError,
    },

    #[error("Could not read successfully from {0}")]
    Read(PathBuf),

    #[error("In {path}, entry for {name} is missing required field {field}")]
    MissingField {
        path: PathBuf,
        name: String,
        field: &'static str,
    },

    #[error("An alias ({0}) was found which is already a name or alias")]
    DuplicateAlias(String),

    #[error("Invalid space character found in {field} field: \"{value}\"")]
    Space { field: &'static str, value: String },
}

/// A web-accessible file useful to multiple web products: an image, a
/// style sheet, and so on.
#[derive(Debug, Clone, Serialize)]
pub struct SharedComponent {
    name: String,
    url: String,
    aliases: Vec<String>,
    height: Option<String>,
    width: Option<String>,
    alt: Option<String>,
}

impl SharedComponent {
    fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            aliases: Vec::new(),
            height: None,
            width: None,
            alt: None,
        }
    }

    fn add_alias(&mut self, alias: &str) {
        if !self.aliases.iter().any(|known| known == alias) {
            self.aliases.push(alias.to_owned());
        }
    }

    /// Preferred identifier for this component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this component can be retrieved from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Height in pixels, if known.
    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }

    /// Width in pixels, if known.
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// Value for the ALT attribute, if one was set.
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    /// Non-preferred names for this component.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// An `<IMG>` tag for this component, with whichever optional
    /// attributes are known.
    pub fn img_tag(&self) -> String {
        let mut parts = vec![format!("IMG SRC=\"{}\" BORDER=0", self.url)];
        if let Some(height) = &self.height {
            parts.push(format!("HEIGHT=\"{}\"", height));
        }
        if let Some(width) = &self.width {
            parts.push(format!("WIDTH=\"{}\"", width));
        }
        if let Some(alt) = &self.alt {
            parts.push(format!("ALT=\"{}\"", alt));
        }
        format!("<{}>", parts.join(" "))
    }

    /// A `<LINK>` tag loading this component as a style sheet.
    pub fn style_sheet_tag(&self) -> String {
        format!(
            "<LINK REL=\"stylesheet\" HREF=\"{}\" TYPE=\"text/css\">",
            self.url
        )
    }

    /// The tag appropriate for this component, chosen by the URL's
    /// extension: `.css` means style sheet, anything else an image.
    pub fn html_tag(&self) -> String {
        match self.url.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("css") => self.style_sheet_tag(),
            _ => self.img_tag(),
        }
    }

    /// This component rendered back as one rcd record.
    pub fn to_rcd(&self) -> String {
        let mut lines = vec![
            "[".to_owned(),
            format!("name = {}", self.name),
            format!("url = {}", self.url),
        ];
        if let Some(height) = &self.height {
            lines.push(format!("height = {}", height));
        }
        if let Some(width) = &self.width {
            lines.push(format!("width = {}", width));
        }
        if let Some(alt) = &self.alt {
            lines.push(format!("alt = {}", alt));
        }
        for alias in &self.aliases {
            lines.push(format!("alias = {}", alias));
        }
        lines.push("]".to_owned());
        lines.join("\n")
    }
}

/// Mapping from names and aliases to their [`SharedComponent`]s.
///
/// Names and aliases must be unique across the whole file; duplicates
/// fail loading.
#[derive(Debug, Clone)]
pub struct SharedComponents {
    rcd_path: PathBuf,
    alias_to_name: BTreeMap<String, String>,
    components: BTreeMap<String, SharedComponent>,
}

impl SharedComponents {
    /// Build the registry from the rcd file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, WebshareError> {
        let path = path.into();
        let text =
            fs::read_to_string(&path).map_err(|_| WebshareError::Read(path.clone()))?;
        let rcdfile = RcdFile::parse(&text, "name").map_err(|source| WebshareError::Rcd {
            path: path.clone(),
            source,
        })?;

        // every name and alias lands here so duplicates can be caught
        let mut names_aliases: BTreeSet<String> = BTreeSet::new();
        for name in rcdfile.names() {
            check_no_space("name", name)?;
            names_aliases.insert(name.to_owned());
        }

        let mut alias_to_name = BTreeMap::new();
        let mut components = BTreeMap::new();
        for (name, record) in rcdfile.iter() {
            let url = record.get("url").ok_or_else(|| WebshareError::MissingField {
                path: path.clone(),
                name: name.to_owned(),
                field: "url",
            })?;

            let mut component = SharedComponent::new(name, url);

            for alias in record.get_all("alias") {
                if names_aliases.contains(alias) {
                    return Err(WebshareError::DuplicateAlias(alias.clone()));
                }
                check_no_space("alias", alias)?;
                alias_to_name.insert(alias.clone(), name.to_owned());
                component.add_alias(alias);
                names_aliases.insert(alias.clone());
            }

            component.height = record.get("height").map(str::to_owned);
            component.width = record.get("width").map(str::to_owned);
            component.alt = record.get("alt").map(str::to_owned);

            components.insert(name.to_owned(), component);
        }

        Ok(Self {
            rcd_path: path,
            alias_to_name,
            components,
        })
    }

    /// Look a component up by name or alias.
    pub fn get(&self, name_or_alias: &str) -> Option<&SharedComponent> {
        if let Some(component) = self.components.get(name_or_alias) {
            return Some(component);
        }
        self.alias_to_name
            .get(name_or_alias)
            .and_then(|name| self.components.get(name))
    }

    /// Preferred names of every component.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Every alias known to the registry.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.alias_to_name.keys().map(String::as_str)
    }

    /// The raw contents of the defining rcd file, re-read from disk.
    pub fn rcd_source(&self) -> Result<String, WebshareError> {
        fs::read_to_string(&self.rcd_path).map_err(|_| WebshareError::Read(self.rcd_path.clone()))
    }
}

fn check_no_space(field: &'static str, value: &str) -> Result<(), WebshareError> {
    if value.contains(' ') {
        return Err(WebshareError::Space {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_rcd(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "\
[
name = logo
url = /images/logo.gif
height = 40
width = 120
alt = Site logo
alias = mainLogo
]
[
name = site_css
url = /css/SITE.CSS
]
";

    #[test]
    fn lookup_by_name_and_alias() {
        let file = write_rcd(SAMPLE);
        let registry = SharedComponents::load(file.path()).unwrap();

        let by_name = registry.get("logo").unwrap();
        let by_alias = registry.get("mainLogo").unwrap();
        assert_eq!(by_name.name(), by_alias.name());
        assert_eq!(by_name.url(), "/images/logo.gif");
        assert!(registry.get("missing").is_none());

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["logo", "site_css"]);
        assert_eq!(registry.aliases().collect::<Vec<_>>(), vec!["mainLogo"]);
    }

    #[test]
    fn img_tag_carries_optional_attributes() {
        let file = write_rcd(SAMPLE);
        let registry = SharedComponents::load(file.path()).unwrap();
        assert_eq!(
            registry.get("logo").unwrap().img_tag(),
            "<IMG SRC=\"/images/logo.gif\" BORDER=0 HEIGHT=\"40\" WIDTH=\"120\" ALT=\"Site logo\">"
        );
    }

    #[test]
    fn css_extension_picks_the_link_tag() {
        let file = write_rcd(SAMPLE);
        let registry = SharedComponents::load(file.path()).unwrap();
        assert_eq!(
            registry.get("site_css").unwrap().html_tag(),
            "<LINK REL=\"stylesheet\" HREF=\"/css/SITE.CSS\" TYPE=\"text/css\">"
        );
        assert!(registry.get("logo").unwrap().html_tag().starts_with("<IMG"));
    }

    #[test]
    fn record_round_trips_through_rcd_text() {
        let file = write_rcd(SAMPLE);
        let registry = SharedComponents::load(file.path()).unwrap();
        let rendered = registry.get("logo").unwrap().to_rcd();

        let reparsed = RcdFile::parse(&rendered, "name").unwrap();
        let record = reparsed.get("logo").unwrap();
        assert_eq!(record.get("url"), Some("/images/logo.gif"));
        assert_eq!(record.get("height"), Some("40"));
        assert_eq!(record.get_all("alias"), ["mainLogo"]);
    }

    #[test]
    fn duplicate_alias_fails_loading() {
        let text = "[\nname = a\nurl = /a\nalias = b\n]\n[\nname = b\nurl = /b\n]\n";
        let file = write_rcd(text);
        assert!(matches!(
            SharedComponents::load(file.path()),
            Err(WebshareError::DuplicateAlias(alias)) if alias == "b"
        ));
    }

    #[test]
    fn spaces_in_names_fail_loading() {
        let text = "[\nname = bad name\nurl = /x\n]\n";
        let file = write_rcd(text);
        assert!(matches!(
            SharedComponents::load(file.path()),
            Err(WebshareError::Space { field: "name", .. })
        ));
    }

    #[test]
    fn missing_url_fails_loading() {
        let text = "[\nname = a\n]\n";
        let file = write_rcd(text);
        assert!(matches!(
            SharedComponents::load(file.path()),
            Err(WebshareError::MissingField { field: "url", .. })
        ));
    }
}
