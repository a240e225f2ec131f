//! Running the scoring engine over exported patient records.

use std::path::Path;

use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use kneeform_core::models::patient::{PatientRecord, parse_records};
use kneeform_instruments::Instrument;
use kneeform_instruments::get_instrument;
use kneeform_instruments::history::{ScoredEntry, score_current, score_history};
use kneeform_instruments::scoring::AnswerIssue;
use serde::Serialize;

/// What to do with answers the scorers had to ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Log each issue and keep going.
    Warn,
    /// Fail on the first issue.
    Strict,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub form: FormKind,
    pub name: String,
    pub current: ScoredEntry,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ScoredEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<AnswerIssue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientReport {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub has_surgery: bool,
    pub forms: Vec<FormReport>,
}

pub fn load_records(path: &Path) -> eyre::Result<Vec<PatientRecord>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read records at {}: {e}", path.display()))?;
    let records = parse_records(&contents)?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Every record, or the one matching `patient` by id or email.
pub fn select<'a>(
    records: &'a [PatientRecord],
    patient: Option<&str>,
) -> eyre::Result<Vec<&'a PatientRecord>> {
    let Some(key) = patient else {
        return Ok(records.iter().collect());
    };
    let found: Vec<_> = records.iter().filter(|r| r.matches(key)).collect();
    if found.is_empty() {
        return Err(eyre::eyre!("no patient matches {key}"));
    }
    Ok(found)
}

/// Score the primary entry of each requested form the patient has,
/// optionally with its history.
pub fn patient_report(
    record: &PatientRecord,
    forms: &[FormKind],
    with_history: bool,
    validation: Validation,
) -> eyre::Result<PatientReport> {
    let mut reports = Vec::new();

    for &kind in forms {
        let Some(entry) = record.primary_entry(kind) else {
            tracing::debug!(patient = %record.id, form = %kind, "no entries");
            continue;
        };
        let instrument = get_instrument(kind);

        let mut issues = check(instrument.as_ref(), &record.id, &entry.answers, validation)?;
        let history = if with_history {
            for item in entry.history(kind) {
                issues.extend(check(
                    instrument.as_ref(),
                    &record.id,
                    &item.answers,
                    validation,
                )?);
            }
            score_history(instrument.as_ref(), entry)
        } else {
            Vec::new()
        };

        reports.push(FormReport {
            form: kind,
            name: instrument.name().to_string(),
            current: score_current(instrument.as_ref(), entry),
            history,
            issues,
        });
    }

    tracing::info!(patient = %record.id, forms = reports.len(), "scored patient");

    Ok(PatientReport {
        id: record.id.clone(),
        display_name: record.display_name().to_string(),
        email: record.email.clone(),
        has_surgery: record.has_surgery,
        forms: reports,
    })
}

fn check(
    instrument: &dyn Instrument,
    patient: &str,
    answers: &AnswerRecord,
    validation: Validation,
) -> eyre::Result<Vec<AnswerIssue>> {
    if validation == Validation::Strict {
        instrument.ensure_valid(answers)?;
        return Ok(Vec::new());
    }

    let issues = instrument.validate_answers(answers);
    for issue in &issues {
        tracing::warn!(
            patient,
            form = instrument.id(),
            question = %issue.question_id,
            "{issue}"
        );
    }
    Ok(issues)
}
