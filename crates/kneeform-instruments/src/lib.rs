//! kneeform-instruments
//!
//! Knee questionnaire definitions and their scoring engine. Pure data and
//! pure functions: every scorer reads one [`AnswerRecord`] snapshot and
//! allocates its own result, so calls can run per row or per historical
//! entry with no shared state.

pub mod error;
pub mod history;
pub mod instruments;
pub mod scoring;

use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;

use scoring::{AnswerIssue, Question, QuestionAnswer, ScoreSummary, Section};

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// The form this instrument scores.
    fn kind(&self) -> FormKind;

    /// Unique identifier (the form's storage key, e.g. "ikdc").
    fn id(&self) -> &str {
        self.kind().storage_key()
    }

    /// Human-readable name (e.g., "IKDC", "Lysholm-Tegner").
    fn name(&self) -> &str;

    /// Section headings, in display order. Empty for ungrouped forms.
    fn sections(&self) -> &[Section] {
        &[]
    }

    /// Every collected question, scored or not, in display order.
    fn questions(&self) -> &[Question];

    /// Score one submission.
    fn score(&self, answers: &AnswerRecord) -> ScoreSummary;

    /// Number of questions that feed the score.
    fn scorable_count(&self) -> usize {
        self.questions()
            .iter()
            .filter(|q| !q.excluded_from_score)
            .count()
    }

    /// Answers that are present but unusable. Scoring already skips them.
    fn validate_answers(&self, answers: &AnswerRecord) -> Vec<AnswerIssue> {
        self.questions()
            .iter()
            .filter_map(|q| q.check(answers))
            .collect()
    }

    /// Fail on the first unusable answer.
    fn ensure_valid(&self, answers: &AnswerRecord) -> Result<(), error::InstrumentError> {
        match self.validate_answers(answers).into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(()),
        }
    }

    /// One display line per question, grouped under section titles.
    fn question_answers(&self, answers: &AnswerRecord) -> Vec<QuestionAnswer> {
        self.questions()
            .iter()
            .map(|q| QuestionAnswer {
                id: q.id.clone(),
                text: q.text.clone(),
                answer: q.answer_text(answers),
                section: self.section_title(q.section.as_deref()),
            })
            .collect()
    }

    fn section_title(&self, key: Option<&str>) -> Option<String> {
        let key = key?;
        self.sections()
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.title.clone())
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::ikdc::Ikdc),
        Box::new(instruments::lysholm::LysholmTegner),
        Box::new(instruments::womac::Womac),
        Box::new(instruments::iks::Iks),
        Box::new(instruments::koos::Koos),
    ]
}

/// Look up the instrument that scores a form.
pub fn get_instrument(kind: FormKind) -> Box<dyn Instrument> {
    match kind {
        FormKind::Ikdc => Box::new(instruments::ikdc::Ikdc),
        FormKind::LysholmTegner => Box::new(instruments::lysholm::LysholmTegner),
        FormKind::Womac => Box::new(instruments::womac::Womac),
        FormKind::Iks => Box::new(instruments::iks::Iks),
        FormKind::Koos => Box::new(instruments::koos::Koos),
    }
}

/// Look up an instrument by form name or storage key.
pub fn find_instrument(id: &str) -> Result<Box<dyn Instrument>, error::InstrumentError> {
    let kind = id
        .parse::<FormKind>()
        .map_err(|_| error::InstrumentError::UnknownInstrument(id.to_string()))?;
    Ok(get_instrument(kind))
}
