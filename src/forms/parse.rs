//! Decoding and operator rewriting for submitted forms.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use crate::forms::field::{Field, FieldType, FieldValue};

/// Error type for form parsing.
#[derive(Debug, Error)]
pub enum FormError {
    /// A bare key with no entry in the default-type map.
    #[error("unknown form field \"{0}\"")]
    UnknownField(String),

    /// A key prefix naming no known type.
    #[error("unknown type prefix \"{prefix}\" on field \"{name}\"")]
    UnknownPrefix { prefix: String, name: String },

    /// A numeric field whose value would not convert.
    #[error("Unable to convert the value \"{value}\" to a number for field \"{field}\"")]
    BadNumber { field: String, value: String },
}

/// Seed configuration for a field the form may or may not fill in.
#[derive(Debug, Clone)]
pub struct FieldDefault {
    pub op: String,
    pub value: Option<FieldValue>,
}

impl Default for FieldDefault {
    fn default() -> Self {
        Self {
            op: "=".to_owned(),
            value: None,
        }
    }
}

/// Parsed form content: field name → [`Field`].
#[derive(Debug, Clone, Default)]
pub struct FormContent {
    fields: BTreeMap<String, Field>,
}

impl FormContent {
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Definition list of the parsed fields, handy on debug pages.
impl fmt::Display for FormContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<dl>")?;
        for (name, field) in &self.fields {
            writeln!(f, "<dt>{}", name)?;
            writeln!(f, "<dd>{} {}", field.op, field.value)?;
        }
        write!(f, "</dl>")
    }
}

struct Working {
    op: String,
    value: Option<FieldValue>,
}

impl Default for Working {
    fn default() -> Self {
        Self {
            op: "=".to_owned(),
            value: None,
        }
    }
}

/// Parse urlencoded form `content` into typed fields.
///
/// Keys are `type:name` pairs (`op:` and `not:` set the operator and
/// negation for `name` instead of a value); bare keys are typed via
/// `default_types`. `defaults` seeds fields the form may leave alone.
///
/// The returned operators are rewritten for condition generation:
/// `begins`/`ends`/`contains` become `like` with `%` wildcards, a
/// valueless `is null` becomes `is` against the literal `null`, and
/// `not:`-marked fields get their operator negated. Fields that end up
/// with no value are dropped.
pub fn parse(
    content: &str,
    defaults: &BTreeMap<String, FieldDefault>,
    default_types: &BTreeMap<String, FieldType>,
) -> Result<FormContent, FormError> {
    let mut working: BTreeMap<String, Working> = defaults
        .iter()
        .map(|(name, seed)| {
            (
                name.clone(),
                Working {
                    op: seed.op.clone(),
                    value: seed.value.clone(),
                },
            )
        })
        .collect();
    let mut negated: BTreeSet<String> = BTreeSet::new();

    // 1st pass - collect operators and values.
    for (key, value) in url::form_urlencoded::parse(content.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.split_once(':') {
            Some(("op", name)) => {
                working.entry(name.to_owned()).or_default().op = value.to_owned();
            }
            Some(("not", name)) => {
                negated.insert(name.to_owned());
            }
            Some((prefix, name)) => {
                let ftype =
                    FieldType::from_prefix(prefix).ok_or_else(|| FormError::UnknownPrefix {
                        prefix: prefix.to_owned(),
                        name: name.to_owned(),
                    })?;
                let entry = working.entry(name.to_owned()).or_default();
                apply_value(entry, name, ftype, value)?;
            }
            None => {
                let name = key.as_ref();
                let ftype = *default_types
                    .get(name)
                    .ok_or_else(|| FormError::UnknownField(name.to_owned()))?;
                let entry = working.entry(name.to_owned()).or_default();
                apply_value(entry, name, ftype, value)?;
            }
        }
    }

    // 2nd pass - rewrite operators, drop valueless fields.
    let mut fields = BTreeMap::new();
    for (name, work) in working {
        let mut op = work.op;
        let mut value = match work.value {
            Some(value) => {
                if op.eq_ignore_ascii_case("is null") {
                    // a filled-in value contradicts the operator
                    continue;
                }
                value
            }
            None => {
                if op.eq_ignore_ascii_case("is null") {
                    op = "is".to_owned();
                    FieldValue::Text("null".to_owned())
                } else {
                    continue;
                }
            }
        };

        let rewritten = match op.as_str() {
            "begins" => add_wildcards(&mut value, false, true),
            "ends" => add_wildcards(&mut value, true, false),
            "contains" => add_wildcards(&mut value, true, true),
            _ => false,
        };
        if rewritten {
            op = "like".to_owned();
        }

        fields.insert(name.clone(), Field { name, op, value });
    }

    // Flip operators where NOT was checked.
    for name in negated {
        if let Some(field) = fields.get_mut(&name) {
            field.op = negate(&field.op);
        }
    }

    Ok(FormContent { fields })
}

fn apply_value(
    entry: &mut Working,
    name: &str,
    ftype: FieldType,
    raw: &str,
) -> Result<(), FormError> {
    match ftype {
        FieldType::Text => {
            entry.value = Some(FieldValue::Text(raw.to_owned()));
        }
        FieldType::Int => {
            entry.value = Some(FieldValue::Int(parse_int(name, raw)?));
        }
        FieldType::Float => {
            let parsed = raw.parse().map_err(|_| FormError::BadNumber {
                field: name.to_owned(),
                value: raw.to_owned(),
            })?;
            entry.value = Some(FieldValue::Float(parsed));
        }
        FieldType::IntList => {
            let mut items = Vec::new();
            for piece in split_list(raw) {
                items.push(parse_int(name, &piece)?);
            }
            match &mut entry.value {
                Some(FieldValue::IntList(existing)) => existing.extend(items),
                _ => entry.value = Some(FieldValue::IntList(items)),
            }
        }
        FieldType::TextList => {
            let items = split_list(raw);
            match &mut entry.value {
                Some(FieldValue::TextList(existing)) => existing.extend(items),
                _ => entry.value = Some(FieldValue::TextList(items)),
            }
        }
        FieldType::OptionList => match &mut entry.value {
            Some(FieldValue::OptionList(existing)) => existing.push(raw.to_owned()),
            _ => entry.value = Some(FieldValue::OptionList(vec![raw.to_owned()])),
        },
    }
    Ok(())
}

fn parse_int(name: &str, raw: &str) -> Result<i64, FormError> {
    raw.parse().map_err(|_| FormError::BadNumber {
        field: name.to_owned(),
        value: raw.to_owned(),
    })
}

/// Comma-separated list values, with ", " collapsed the way submitted
/// lists usually arrive.
fn split_list(raw: &str) -> Vec<String> {
    raw.replace(", ", ",")
        .split(',')
        .map(|piece| piece.trim().to_owned())
        .collect()
}

fn add_wildcards(value: &mut FieldValue, front: bool, back: bool) -> bool {
    let wildcard = |s: &mut String| {
        if front {
            s.insert(0, '%');
        }
        if back {
            s.push('%');
        }
    };
    match value {
        FieldValue::Text(s) => {
            wildcard(s);
            true
        }
        FieldValue::TextList(items) => {
            for s in items {
                wildcard(s);
            }
            true
        }
        _ => false,
    }
}

fn negate(op: &str) -> String {
    match op {
        "=" => "!=".to_owned(),
        "is" => "is not".to_owned(),
        other => format!("not {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_defaults() -> (BTreeMap<String, FieldDefault>, BTreeMap<String, FieldType>) {
        (BTreeMap::new(), BTreeMap::new())
    }

    #[test]
    fn begins_becomes_like_with_trailing_wildcard() {
        let (defaults, types) = no_defaults();
        let form = parse("string:symbol=Pax&op:symbol=begins", &defaults, &types).unwrap();
        let field = form.get("symbol").unwrap();
        assert_eq!(field.op, "like");
        assert_eq!(field.value, FieldValue::Text("Pax%".to_owned()));
    }

    #[test]
    fn ends_and_contains_place_wildcards() {
        let (defaults, types) = no_defaults();
        let form = parse("string:a=x&op:a=ends&string:b=y&op:b=contains", &defaults, &types)
            .unwrap();
        assert_eq!(form.get("a").unwrap().value, FieldValue::Text("%x".to_owned()));
        assert_eq!(form.get("b").unwrap().value, FieldValue::Text("%y%".to_owned()));
    }

    #[test]
    fn list_values_get_wildcards_each() {
        let (defaults, types) = no_defaults();
        let form = parse(
            "string_list:symbol=Pax6, Kit&op:symbol=contains",
            &defaults,
            &types,
        )
        .unwrap();
        assert_eq!(
            form.get("symbol").unwrap().value,
            FieldValue::TextList(vec!["%Pax6%".to_owned(), "%Kit%".to_owned()])
        );
        assert_eq!(form.get("symbol").unwrap().op, "like");
    }

    #[test]
    fn not_flips_operators() {
        let (defaults, types) = no_defaults();
        let form = parse(
            "string:a=x&not:a=1&string:b=y&op:b=contains&not:b=1",
            &defaults,
            &types,
        )
        .unwrap();
        assert_eq!(form.get("a").unwrap().op, "!=");
        assert_eq!(form.get("b").unwrap().op, "not like");
    }

    #[test]
    fn is_null_without_value_becomes_is_null_literal() {
        let (defaults, types) = no_defaults();
        let form = parse("op:age=is null", &defaults, &types).unwrap();
        let field = form.get("age").unwrap();
        assert_eq!(field.op, "is");
        assert_eq!(field.value, FieldValue::Text("null".to_owned()));
    }

    #[test]
    fn negated_is_null() {
        let (defaults, types) = no_defaults();
        let form = parse("op:age=is null&not:age=1", &defaults, &types).unwrap();
        assert_eq!(form.get("age").unwrap().op, "is not");
    }

    #[test]
    fn is_null_with_value_is_dropped() {
        let (defaults, types) = no_defaults();
        let form = parse("string:age=12&op:age=is null", &defaults, &types).unwrap();
        assert!(!form.contains("age"));
    }

    #[test]
    fn empty_values_and_valueless_fields_vanish() {
        let (mut defaults, mut types) = no_defaults();
        types.insert("symbol".to_owned(), FieldType::Text);
        defaults.insert("limit".to_owned(), FieldDefault::default());
        let form = parse("symbol=", &defaults, &types).unwrap();
        assert!(form.is_empty());
    }

    #[test]
    fn defaults_seed_fields() {
        let (mut defaults, types) = no_defaults();
        defaults.insert(
            "limit".to_owned(),
            FieldDefault {
                op: "=".to_owned(),
                value: Some(FieldValue::Int(100)),
            },
        );
        let form = parse("", &defaults, &types).unwrap();
        assert_eq!(form.get("limit").unwrap().value, FieldValue::Int(100));
    }

    #[test]
    fn bare_keys_use_default_types() {
        let (defaults, mut types) = no_defaults();
        types.insert("limit".to_owned(), FieldType::Int);
        let form = parse("limit=500", &defaults, &types).unwrap();
        assert_eq!(form.get("limit").unwrap().value, FieldValue::Int(500));
    }

    #[test]
    fn unknown_bare_key_is_an_error() {
        let (defaults, types) = no_defaults();
        assert!(matches!(
            parse("mystery=3", &defaults, &types),
            Err(FormError::UnknownField(name)) if name == "mystery"
        ));
    }

    #[test]
    fn bad_number_names_field_and_value() {
        let (defaults, types) = no_defaults();
        let err = parse("int:limit=abc", &defaults, &types).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to convert the value \"abc\" to a number for field \"limit\""
        );
    }

    #[test]
    fn int_list_accepts_commas_and_repeats() {
        let (defaults, types) = no_defaults();
        let form = parse("int_list:keys=1,2, 3&int_list:keys=4", &defaults, &types).unwrap();
        assert_eq!(
            form.get("keys").unwrap().value,
            FieldValue::IntList(vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn option_list_accumulates_selections() {
        let (defaults, types) = no_defaults();
        let form = parse(
            "option_list:chromosome=1&option_list:chromosome=X",
            &defaults,
            &types,
        )
        .unwrap();
        assert_eq!(
            form.get("chromosome").unwrap().value,
            FieldValue::OptionList(vec!["1".to_owned(), "X".to_owned()])
        );
    }

    #[test]
    fn plus_signs_decode_to_spaces() {
        let (defaults, types) = no_defaults();
        let form = parse("string:note=two+words", &defaults, &types).unwrap();
        assert_eq!(
            form.get("note").unwrap().value,
            FieldValue::Text("two words".to_owned())
        );
    }
}
