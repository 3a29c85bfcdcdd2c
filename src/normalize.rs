//! Flattening raw posts into fixed-schema records.

use crate::fields::{Field, FIELDS, TARGET_USER_FIELD};
use crate::filters::is_reshare;
use serde::Serialize;
use serde_json::{Map, Value};

/// A flat, insertion-ordered record: every field of [`FIELDS`] plus the target account.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String view of a field; non-string values are rendered as JSON text.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Normalize one post against an explicit field table.
pub fn normalize_with(fields: &[Field], post: &Value, target_user: &str) -> Record {
    let mut map = Map::with_capacity(fields.len() + 1);
    for field in fields {
        map.insert(field.name.to_string(), field.read_or_default(post));
    }
    map.insert(TARGET_USER_FIELD.to_string(), Value::String(target_user.to_string()));
    Record(map)
}

/// Normalize one post with the standard attribute table.
pub fn normalize(post: &Value, target_user: &str) -> Record {
    normalize_with(&FIELDS, post, target_user)
}

/// In-memory accumulator for a run: filters re-shares, normalizes the rest, keeps order.
#[derive(Debug, Default)]
pub struct RecordSet {
    target_user: String,
    records: Vec<Record>,
    seen: u64,
    reshares: u64,
}

impl RecordSet {
    pub fn new(target_user: impl Into<String>) -> Self {
        Self { target_user: target_user.into(), ..Default::default() }
    }

    /// Offer one raw post. Returns true if it was kept.
    pub fn push(&mut self, post: &Value) -> bool {
        self.seen += 1;
        if is_reshare(post) {
            self.reshares += 1;
            return false;
        }
        self.records.push(normalize(post, &self.target_user));
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Posts offered so far, including re-shares.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn reshares(&self) -> u64 {
        self.reshares
    }
}
