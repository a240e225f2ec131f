use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// One patient submission at one point in time: question id to the raw
/// stored value.
///
/// Values keep the JSON shape they arrived with. Unanswered items are
/// absent or `null` and are never coerced to zero; deciding whether a value
/// is usable is the scorer's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerRecord(BTreeMap<String, Value>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every field of a JSON object except the named keys.
    pub fn from_object(map: &serde_json::Map<String, Value>, skip: &[&str]) -> Self {
        map.iter()
            .filter(|(key, _)| !skip.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(id.into(), value.into());
    }

    /// Builder form of [`AnswerRecord::insert`].
    pub fn with(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(id, value);
        self
    }

    /// The raw value, with `null` and empty strings treated as absent.
    pub fn get(&self, id: &str) -> Option<&Value> {
        match self.0.get(id)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            other => Some(other),
        }
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// A finite JSON number. Strings, booleans and objects are not numbers.
    pub fn number(&self, id: &str) -> Option<f64> {
        self.get(id)?.as_f64().filter(|n| n.is_finite())
    }

    /// A presence flag: `true`/`false`, or a number (non-zero is set).
    pub fn flag(&self, id: &str) -> Option<bool> {
        match self.get(id)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for AnswerRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
