//! Schema validation for import batches.
//!
//! The whole batch is checked before anything is written. Every violation of
//! every record is collected into one [`ValidationReport`], so a rejected
//! batch can be fixed in a single pass.

use super::types::ImportRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Field name used for errors that concern a whole item or the whole batch
pub const SCHEMA_FIELD: &str = "_schema";

const REQUIRED_STRINGS: [&str; 3] = ["firstname", "lastname", "username"];
const KNOWN_FIELDS: [&str; 6] = ["id", "firstname", "lastname", "username", "email", "roles"];

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";
const NOT_STRING: &str = "Not a valid string.";
const EMPTY: &str = "Field may not be empty.";
const BAD_EMAIL: &str = "Not a valid email address.";
const NOT_INTEGER: &str = "Not a valid integer.";
const NOT_LIST: &str = "Not a valid list.";
const TOO_SHORT: &str = "Shorter than minimum length 1.";
const UNKNOWN: &str = "Unknown field.";
const BAD_TYPE: &str = "Invalid input type.";

/// Local part: dot-separated atoms of word characters and symbols, or a
/// quoted string
static USER_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(?:[-!#$%&'*+/=?^`{}|~\w]+(?:\.[-!#$%&'*+/=?^`{}|~\w]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")$"#,
    )
    .ok()
});

/// Dotted hostname whose last label is at least two characters and does not
/// end in a hyphen
static DOMAIN_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:[a-z]{2,6}|[a-z0-9-]+[a-z0-9])$",
    )
    .ok()
});

/// Domains accepted without a dot
const DOMAIN_ALLOWLIST: [&str; 1] = ["localhost"];

fn is_match(regex: &Lazy<Option<Regex>>, value: &str) -> bool {
    regex.as_ref().is_some_and(|re| re.is_match(value))
}

/// Check that `email` is a syntactically valid address
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((user, domain)) = email.rsplit_once('@') else {
        return false;
    };
    is_match(&USER_REGEX, user)
        && (DOMAIN_ALLOWLIST.contains(&domain) || is_match(&DOMAIN_REGEX, domain))
}

/// Batch-level violations keyed by record index, then field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    batch: Vec<String>,
    items: BTreeMap<usize, BTreeMap<String, Vec<String>>>,
}

impl ValidationReport {
    fn add(&mut self, index: usize, field: &str, message: impl Into<String>) {
        self.items
            .entry(index)
            .or_default()
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty() && self.items.is_empty()
    }

    /// Indexes of the records that failed, ascending
    pub fn failed_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.keys().copied()
    }

    /// Messages recorded for one field of one record
    #[must_use]
    pub fn messages(&self, index: usize, field: &str) -> &[String] {
        self.items
            .get(&index)
            .and_then(|fields| fields.get(field))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Messages about the batch as a whole
    #[must_use]
    pub fn batch_messages(&self) -> &[String] {
        &self.batch
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if !self.batch.is_empty() {
            lines.push("[Batch]".to_string());
            lines.push(format!("\t{SCHEMA_FIELD}: {}", self.batch.join(" ")));
        }
        for (index, fields) in &self.items {
            lines.push(format!("[Item {index}]"));
            for (field, messages) in fields {
                lines.push(format!("\t{field}: {}", messages.join(" ")));
            }
        }
        write!(f, "{}", lines.join("\n"))
    }
}

fn check_required_string(
    report: &mut ValidationReport,
    index: usize,
    object: &Map<String, Value>,
    field: &str,
) {
    match object.get(field) {
        None => report.add(index, field, MISSING),
        Some(Value::Null) => report.add(index, field, NULL),
        Some(Value::String(s)) if s.is_empty() => report.add(index, field, EMPTY),
        Some(Value::String(_)) => {}
        Some(_) => report.add(index, field, NOT_STRING),
    }
}

fn check_email(report: &mut ValidationReport, index: usize, object: &Map<String, Value>) {
    match object.get("email") {
        None => report.add(index, "email", MISSING),
        Some(Value::Null) => report.add(index, "email", NULL),
        Some(Value::String(s)) if is_valid_email(s) => {}
        Some(Value::String(_)) => report.add(index, "email", BAD_EMAIL),
        Some(_) => report.add(index, "email", NOT_STRING),
    }
}

fn check_id(report: &mut ValidationReport, index: usize, object: &Map<String, Value>) {
    match object.get("id") {
        None => {}
        Some(Value::Null) => report.add(index, "id", NULL),
        Some(v) if v.is_i64() || v.is_u64() => {}
        Some(_) => report.add(index, "id", NOT_INTEGER),
    }
}

fn check_roles(report: &mut ValidationReport, index: usize, object: &Map<String, Value>) {
    match object.get("roles") {
        None => report.add(index, "roles", MISSING),
        Some(Value::Null) => report.add(index, "roles", NULL),
        Some(Value::Array(items)) if items.is_empty() => report.add(index, "roles", TOO_SHORT),
        Some(Value::Array(items)) => {
            for (pos, item) in items.iter().enumerate() {
                if !item.is_string() {
                    report.add(index, "roles", format!("Item {pos}: {NOT_STRING}"));
                }
            }
        }
        Some(_) => report.add(index, "roles", NOT_LIST),
    }
}

fn check_record(report: &mut ValidationReport, index: usize, item: &Value) {
    let Some(object) = item.as_object() else {
        report.add(index, SCHEMA_FIELD, BAD_TYPE);
        return;
    };

    check_id(report, index, object);
    for field in REQUIRED_STRINGS {
        check_required_string(report, index, object, field);
    }
    check_email(report, index, object);
    check_roles(report, index, object);

    for key in object.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            report.add(index, key, UNKNOWN);
        }
    }
}

/// Validate an untrusted batch and convert it into typed records.
///
/// Returns every violation found, or the records in input order if there
/// were none.
pub fn validate_batch(batch: &Value) -> Result<Vec<ImportRecord>, ValidationReport> {
    let mut report = ValidationReport::default();

    let Some(items) = batch.as_array() else {
        report.batch.push(BAD_TYPE.to_string());
        return Err(report);
    };

    for (index, item) in items.iter().enumerate() {
        check_record(&mut report, index, item);
    }
    if !report.is_empty() {
        return Err(report);
    }

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<ImportRecord>(item.clone()) {
            Ok(record) => records.push(record),
            Err(e) => report.add(index, SCHEMA_FIELD, e.to_string()),
        }
    }
    if report.is_empty() {
        Ok(records)
    } else {
        Err(report)
    }
}
