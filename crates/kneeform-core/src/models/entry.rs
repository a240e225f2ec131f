use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::answer::AnswerRecord;
use super::form::FormKind;
use crate::timestamp;

/// Keys of a stored entry that are metadata rather than answers.
const ENTRY_METADATA: &[&str] = &["id", "date", "historical"];

/// One stored submission of a form, as kept by the form store.
///
/// The first entry of a form is the patient's current submission; earlier
/// submissions hang off it in `historical`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormEntry {
    pub id: Option<String>,
    pub submitted_at: Option<jiff::Timestamp>,
    pub answers: AnswerRecord,
    #[serde(default)]
    pub historical: Vec<HistoricalEntry>,
}

/// A past submission attached to a current entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoricalEntry {
    pub id: Option<String>,
    /// Storage key of the form this item belongs to (`ikdc`, `womac`, ...).
    pub form_type: Option<String>,
    pub submitted_at: Option<jiff::Timestamp>,
    pub answers: AnswerRecord,
}

impl FormEntry {
    /// Normalize a raw stored entry. Returns `None` for non-objects.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;

        let historical = match obj.get("historical") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let parsed = HistoricalEntry::from_value(item);
                    if parsed.is_none() {
                        tracing::debug!("skipping historical item that is not an object");
                    }
                    parsed
                })
                .collect(),
            _ => Vec::new(),
        };

        Some(Self {
            id: text(obj.get("id")),
            submitted_at: obj.get("date").and_then(timestamp::from_value),
            answers: AnswerRecord::from_object(obj, ENTRY_METADATA),
            historical,
        })
    }

    /// Historical items of the given form, in stored order.
    pub fn history(&self, kind: FormKind) -> Vec<&HistoricalEntry> {
        self.historical
            .iter()
            .filter(|item| item.is_form(kind))
            .collect()
    }
}

impl HistoricalEntry {
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let answers = match obj.get("data") {
            Some(Value::Object(data)) => AnswerRecord::from_object(data, &[]),
            _ => AnswerRecord::new(),
        };

        Some(Self {
            id: text(obj.get("id")),
            form_type: text(obj.get("type")),
            submitted_at: obj.get("date").and_then(timestamp::from_value),
            answers,
        })
    }

    pub fn is_form(&self, kind: FormKind) -> bool {
        self.form_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(kind.storage_key()))
    }
}

/// A non-empty string field. Numeric ids are kept as their decimal text.
pub(crate) fn text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
