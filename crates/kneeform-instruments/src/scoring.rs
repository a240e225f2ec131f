use kneeform_core::models::answer::AnswerRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use crate::instruments::ikdc::IkdcScore;
use crate::instruments::iks::IksScore;
use crate::instruments::koos::KoosScores;
use crate::instruments::lysholm::LysholmSummary;
use crate::instruments::womac::WomacSummary;

/// Display text for a question with no usable answer.
pub const NO_ANSWER: &str = "Sin respuesta";

/// Defines the valid range for a numeric answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    /// A range whose values must land on `min + k × step`.
    pub const fn stepped(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: Some(step),
        }
    }

    pub fn in_bounds(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        if !self.in_bounds(value) {
            return false;
        }
        match self.step {
            Some(step) if step > 0.0 => {
                let remainder = (value - self.min) % step;
                same(remainder, 0.0) || same(remainder, step)
            }
            _ => true,
        }
    }
}

/// One graded answer: the label shown to the patient and the points it is
/// worth.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub label: String,
    pub value: f64,
}

/// How a question is answered.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum InputKind {
    /// Graded choice; the stored value must be one of the option values.
    Choice { options: Vec<ChoiceOption> },
    /// Continuous scale, stored as a number inside `range`.
    Scale { range: ScoreRange },
    /// A goniometer measurement in degrees.
    Degrees { range: ScoreRange },
    /// Presence flag.
    Flag,
}

/// A subscale or heading that groups questions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub instruction: Option<String>,
}

impl Section {
    pub fn new(key: &str, title: &str, instruction: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            instruction: Some(instruction.to_string()),
        }
    }
}

/// Static definition of one questionnaire item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub input: InputKind,
    /// Key of the [`Section`] this item belongs to, if the instrument has any.
    pub section: Option<String>,
    /// Collected but never scored.
    pub excluded_from_score: bool,
}

impl Question {
    pub fn choice(id: &str, text: &str, options: &[(&str, f64)]) -> Self {
        Self::new(
            id,
            text,
            InputKind::Choice {
                options: options
                    .iter()
                    .map(|(label, value)| ChoiceOption {
                        label: label.to_string(),
                        value: *value,
                    })
                    .collect(),
            },
        )
    }

    /// A whole-number slider from 0 to `max`.
    pub fn scale(id: &str, text: &str, max: f64) -> Self {
        Self::new(
            id,
            text,
            InputKind::Scale {
                range: ScoreRange::stepped(0.0, max, 1.0),
            },
        )
    }

    pub fn degrees(id: &str, text: &str, range: ScoreRange) -> Self {
        Self::new(id, text, InputKind::Degrees { range })
    }

    pub fn flag(id: &str, text: &str) -> Self {
        Self::new(id, text, InputKind::Flag)
    }

    fn new(id: &str, text: &str, input: InputKind) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            input,
            section: None,
            excluded_from_score: false,
        }
    }

    pub fn in_section(mut self, key: &str) -> Self {
        self.section = Some(key.to_string());
        self
    }

    pub fn excluded(mut self) -> Self {
        self.excluded_from_score = true;
        self
    }

    /// The usable answer, or `None` when it is absent, not a number, not
    /// one of the options, or outside the range.
    pub fn value(&self, answers: &AnswerRecord) -> Option<f64> {
        if matches!(self.input, InputKind::Flag) {
            return answers.flag(&self.id).map(|set| if set { 1.0 } else { 0.0 });
        }
        let raw = answers.number(&self.id)?;
        self.accepts(raw).then_some(raw)
    }

    /// Whether `raw` is a legal answer for this question.
    pub fn accepts(&self, raw: f64) -> bool {
        match &self.input {
            InputKind::Choice { options } => options.iter().any(|o| same(o.value, raw)),
            InputKind::Scale { range } | InputKind::Degrees { range } => range.contains(raw),
            InputKind::Flag => same(raw, 0.0) || same(raw, 1.0),
        }
    }

    /// The most points a single answer can be worth.
    pub fn max_value(&self) -> f64 {
        match &self.input {
            InputKind::Choice { options } => {
                options.iter().map(|o| o.value).fold(0.0, f64::max)
            }
            InputKind::Scale { range } | InputKind::Degrees { range } => range.max,
            InputKind::Flag => 1.0,
        }
    }

    pub fn option_label(&self, raw: f64) -> Option<&str> {
        match &self.input {
            InputKind::Choice { options } => options
                .iter()
                .find(|o| same(o.value, raw))
                .map(|o| o.label.as_str()),
            _ => None,
        }
    }

    /// The answer as the detail view prints it.
    pub fn answer_text(&self, answers: &AnswerRecord) -> String {
        let Some(raw) = answers.get(&self.id) else {
            return NO_ANSWER.to_string();
        };
        let Some(number) = raw.as_f64() else {
            return match raw {
                Value::Bool(true) => "Sí".to_string(),
                Value::Bool(false) => "No".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
        };

        match &self.input {
            InputKind::Choice { .. } => self
                .option_label(number)
                .map(str::to_string)
                .unwrap_or_else(|| number.to_string()),
            InputKind::Scale { range } => format!("{number} / {}", range.max),
            InputKind::Degrees { .. } => format!("{number}°"),
            InputKind::Flag => String::from(if same(number, 0.0) { "No" } else { "Sí" }),
        }
    }

    /// Report an answer that is present but unusable.
    pub fn check(&self, answers: &AnswerRecord) -> Option<AnswerIssue> {
        let raw = answers.get(&self.id)?;
        if self.value(answers).is_some() {
            return None;
        }

        let message = match (&self.input, raw.as_f64()) {
            (InputKind::Flag, _) => format!("{}: expected a yes/no flag, got {raw}", self.id),
            (_, None) => format!("{}: expected a number, got {raw}", self.id),
            (InputKind::Choice { .. }, Some(n)) => {
                format!("{}: {n} is not one of the answer options", self.id)
            }
            (InputKind::Scale { range } | InputKind::Degrees { range }, Some(n)) => {
                match range.step {
                    Some(step) if range.in_bounds(n) => {
                        format!("{}: {n} is not a multiple of {step}", self.id)
                    }
                    _ => format!(
                        "{}: {n} is outside range [{}, {}]",
                        self.id, range.min, range.max
                    ),
                }
            }
        };

        Some(AnswerIssue {
            question_id: self.id.clone(),
            value: raw.clone(),
            message,
        })
    }
}

/// A stored answer the scorers had to ignore.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerIssue {
    pub question_id: String,
    pub value: Value,
    pub message: String,
}

/// A qualitative reading of a score and the color the dashboard paints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub label: String,
    pub color: String,
}

/// One row of an interpretation table: scores at or above `min` get this
/// label, unless an earlier row already matched.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: u32,
    pub label: &'static str,
    pub color: &'static str,
}

impl Band {
    pub fn interpretation(&self) -> Interpretation {
        Interpretation {
            label: self.label.to_string(),
            color: self.color.to_string(),
        }
    }
}

/// Map a score through a table ordered from the highest band down.
pub(crate) fn interpret(bands: &[Band], score: u32) -> Interpretation {
    bands
        .iter()
        .find(|band| score >= band.min)
        .or(bands.last())
        .map(Band::interpretation)
        .unwrap_or(Interpretation {
            label: String::new(),
            color: String::new(),
        })
}

/// One question of a submission, ready for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionAnswer {
    pub id: String,
    pub text: String,
    pub answer: String,
    /// Title of the section heading this line sits under.
    pub section: Option<String>,
}

/// Scorer output tagged by instrument, as the detail and history views
/// consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type")]
#[ts(export)]
pub enum ScoreSummary {
    #[serde(rename = "IKDC")]
    Ikdc(IkdcScore),
    #[serde(rename = "LYSHOLM")]
    Lysholm(LysholmSummary),
    #[serde(rename = "WOMAC")]
    Womac(WomacSummary),
    #[serde(rename = "IKS")]
    Iks(IksScore),
    #[serde(rename = "KOOS")]
    Koos(KoosScores),
}

/// Round to the nearest integer (halves up) and pin to 0..=100.
pub(crate) fn round_score(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// `+5` / `0` / `-5` suffix used next to awarded or deducted points.
pub fn points_label(points: i64) -> String {
    if points > 0 {
        format!(" (+{points} pts)")
    } else {
        format!(" ({points} pts)")
    }
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
