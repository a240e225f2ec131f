use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::entry::{FormEntry, text};
use super::form::FormKind;
use crate::error::CoreError;

/// One patient row: demographics plus every stored entry per form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub birthdate: Option<String>,
    pub has_surgery: bool,
    pub forms: BTreeMap<FormKind, Vec<FormEntry>>,
}

impl PatientRecord {
    /// Normalize one raw stored patient document.
    ///
    /// `index` is the document's position in the export and only feeds the
    /// fallback id when neither an id nor an email is present.
    pub fn from_value(index: usize, raw: &Value) -> Self {
        let general = |key: &str| raw.get("general").and_then(|g| g.get(key));

        let email = text(raw.get("email")).or_else(|| text(general("email")));
        let id = text(raw.get("id"))
            .or_else(|| text(general("id")))
            .or_else(|| email.clone())
            .unwrap_or_else(|| format!("row-{index}"));

        let forms = FormKind::ALL
            .into_iter()
            .map(|kind| {
                let entries = match raw.get(kind.storage_key()) {
                    Some(Value::Array(items)) => {
                        items.iter().filter_map(FormEntry::from_value).collect()
                    }
                    _ => Vec::new(),
                };
                (kind, entries)
            })
            .collect();

        Self {
            id,
            email,
            name: text(general("name")),
            sex: text(general("sex")),
            birthdate: text(general("birthdate")),
            has_surgery: truthy(general("hasSurgery")),
            forms,
        }
    }

    pub fn entries(&self, kind: FormKind) -> &[FormEntry] {
        self.forms.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The current submission of a form: the first stored entry.
    pub fn primary_entry(&self, kind: FormKind) -> Option<&FormEntry> {
        self.entries(kind).first()
    }

    pub fn has_form(&self, kind: FormKind) -> bool {
        !self.entries(kind).is_empty()
    }

    /// Name when known, else email, else the row id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }

    /// Match against the row id or (case-insensitively) the email.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.id == needle
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.eq_ignore_ascii_case(needle))
    }
}

/// Parse a records export.
///
/// Accepts the store's envelope `{ "ok": true, "records": [...] }` or a bare
/// array of patient documents. An envelope with `ok` false is rejected; a
/// missing `records` array yields no rows.
pub fn parse_records(json: &str) -> Result<Vec<PatientRecord>, CoreError> {
    let doc: Value = serde_json::from_str(json)?;

    let records = match &doc {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => {
            if !obj.get("ok").is_some_and(|ok| ok.as_bool() == Some(true)) {
                return Err(CoreError::Rejected("response without ok".to_string()));
            }
            match obj.get("records") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            }
        }
        _ => {
            return Err(CoreError::Rejected(
                "expected an array or an object envelope".to_string(),
            ));
        }
    };

    let rows: Vec<PatientRecord> = records
        .iter()
        .enumerate()
        .map(|(index, raw)| PatientRecord::from_value(index, raw))
        .collect();
    tracing::info!(count = rows.len(), "normalized patient records");
    Ok(rows)
}

fn truthy(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        _ => false,
    }
}
