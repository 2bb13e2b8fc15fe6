//! The record-oriented config format.
//!
//! Records are bracketed by `[` and `]` lines and hold `key = value`
//! fields, one per line. Repeating a key accumulates values. `#` starts
//! a comment; blank lines are ignored. One designated field names each
//! record:
//!
//! ```text
//! # shared components
//! [
//! name = logo
//! url = /images/logo.gif
//! alias = mainLogo
//! ]
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Error type for rcd parsing.
#[derive(Debug, Error)]
pub enum RcdError {
    #[error("line {line}: field outside any record")]
    StrayLine { line: usize },

    #[error("line {line}: record opened inside another record")]
    NestedRecord { line: usize },

    #[error("line {line}: expected \"key = value\"")]
    BadField { line: usize },

    #[error("record ending at line {line} is missing its \"{key_field}\" field")]
    MissingKeyField { line: usize, key_field: String },

    #[error("duplicate record name \"{0}\"")]
    DuplicateName(String),

    #[error("unterminated record at end of file")]
    UnterminatedRecord,
}

/// One record: field → values in file order.
#[derive(Debug, Clone, Default)]
pub struct Rcd {
    values: BTreeMap<String, Vec<String>>,
}

impl Rcd {
    /// First value for `key`, if the record has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `key`; empty when the record has none.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn push(&mut self, key: &str, value: &str) {
        self.values
            .entry(key.to_owned())
            .or_default()
            .push(value.to_owned());
    }
}

/// A parsed rcd file: named records in file order.
#[derive(Debug, Clone)]
pub struct RcdFile {
    names: Vec<String>,
    records: BTreeMap<String, Rcd>,
}

impl RcdFile {
    /// Parse `text`, naming each record by its `key_field` value.
    pub fn parse(text: &str, key_field: &str) -> Result<Self, RcdError> {
        let mut names = Vec::new();
        let mut records = BTreeMap::new();
        let mut current: Option<Rcd> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "[" {
                if current.is_some() {
                    return Err(RcdError::NestedRecord { line: line_no });
                }
                current = Some(Rcd::default());
            } else if line == "]" {
                let record = current
                    .take()
                    .ok_or(RcdError::StrayLine { line: line_no })?;
                let name = record
                    .get(key_field)
                    .ok_or_else(|| RcdError::MissingKeyField {
                        line: line_no,
                        key_field: key_field.to_owned(),
                    })?
                    .to_owned();
                if records.insert(name.clone(), record).is_some() {
                    return Err(RcdError::DuplicateName(name));
                }
                names.push(name);
            } else {
                let record = current
                    .as_mut()
                    .ok_or(RcdError::StrayLine { line: line_no })?;
                let (key, value) = line
                    .split_once('=')
                    .ok_or(RcdError::BadField { line: line_no })?;
                record.push(key.trim(), value.trim());
            }
        }

        if current.is_some() {
            return Err(RcdError::UnterminatedRecord);
        }
        Ok(Self { names, records })
    }

    pub fn get(&self, name: &str) -> Option<&Rcd> {
        self.records.get(name)
    }

    /// Record names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rcd)> {
        self.names
            .iter()
            .filter_map(|name| self.records.get(name).map(|rcd| (name.as_str(), rcd)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# machine generated
[
name = logo
url = /images/logo.gif
alias = mainLogo
alias = bigLogo
]

[
name = site_css
url = /css/site.css
]
";

    #[test]
    fn parses_records_in_order() {
        let file = RcdFile::parse(SAMPLE, "name").unwrap();
        assert_eq!(file.len(), 2);
        assert_eq!(file.names().collect::<Vec<_>>(), vec!["logo", "site_css"]);
        let logo = file.get("logo").unwrap();
        assert_eq!(logo.get("url"), Some("/images/logo.gif"));
        assert_eq!(logo.get_all("alias"), ["mainLogo", "bigLogo"]);
        assert_eq!(logo.get("height"), None);
        assert!(logo.get_all("height").is_empty());
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let file = RcdFile::parse("# nothing here\n\n", "name").unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn field_outside_record_is_an_error() {
        assert!(matches!(
            RcdFile::parse("name = stray\n", "name"),
            Err(RcdError::StrayLine { line: 1 })
        ));
    }

    #[test]
    fn missing_key_field_is_an_error() {
        let text = "[\nurl = /x\n]\n";
        assert!(matches!(
            RcdFile::parse(text, "name"),
            Err(RcdError::MissingKeyField { line: 3, .. })
        ));
    }

    #[test]
    fn duplicate_names_are_an_error() {
        let text = "[\nname = a\n]\n[\nname = a\n]\n";
        assert!(matches!(
            RcdFile::parse(text, "name"),
            Err(RcdError::DuplicateName(name)) if name == "a"
        ));
    }

    #[test]
    fn unterminated_record_is_an_error() {
        assert!(matches!(
            RcdFile::parse("[\nname = a\n", "name"),
            Err(RcdError::UnterminatedRecord)
        ));
    }
}
