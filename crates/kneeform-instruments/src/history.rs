//! Scoring of a form's current entry and its past submissions.

use kneeform_core::models::entry::FormEntry;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{QuestionAnswer, ScoreSummary};

/// A scored submission, ready for the detail or history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoredEntry {
    pub id: String,
    pub submitted_at: Option<jiff::Timestamp>,
    pub summary: ScoreSummary,
    pub answers: Vec<QuestionAnswer>,
}

/// Score the current submission of a form.
pub fn score_current(instrument: &dyn Instrument, entry: &FormEntry) -> ScoredEntry {
    ScoredEntry {
        id: entry.id.clone().unwrap_or_else(|| "current".to_string()),
        submitted_at: entry.submitted_at,
        summary: instrument.score(&entry.answers),
        answers: instrument.question_answers(&entry.answers),
    }
}

/// Score every historical item of the instrument's form, in stored order.
///
/// Items of other forms are skipped. Items without an id get
/// `historical-{n}`, counted over the kept items only.
pub fn score_history(instrument: &dyn Instrument, entry: &FormEntry) -> Vec<ScoredEntry> {
    let items = entry.history(instrument.kind());
    tracing::debug!(
        form = instrument.id(),
        kept = items.len(),
        total = entry.historical.len(),
        "scoring historical entries"
    );

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ScoredEntry {
            id: item
                .id
                .clone()
                .unwrap_or_else(|| format!("historical-{index}")),
            submitted_at: item.submitted_at,
            summary: instrument.score(&item.answers),
            answers: instrument.question_answers(&item.answers),
        })
        .collect()
}
