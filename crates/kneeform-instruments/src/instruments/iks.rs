//! Knee Society Score.
//!
//! Two independent results from overlapping fields: the Knee Score
//! (pain + mobility + stability, minus deductions) and the Function Score
//! (walking + stairs, minus walking aids). Every deduction is carried as a
//! non-negative magnitude and always subtracted.

use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{
    AnswerIssue, NO_ANSWER, Question, QuestionAnswer, ScoreRange, ScoreSummary, Section,
    points_label,
};

/// Stored field names.
pub mod field {
    pub const PAIN: &str = "painPts";
    pub const FLEXION: &str = "flexDeg";
    pub const STABILITY_AP: &str = "apPts";
    pub const STABILITY_ML: &str = "mlPts";
    pub const FLEXION_CONTRACTURE: &str = "contractureDeg";
    pub const EXTENSION_DEFICIT: &str = "extDefDeg";
    pub const ALIGNMENT_DEGREES: &str = "alignDegrees";
    /// Older submissions stored the alignment under this name.
    pub const ALIGNMENT_DEGREES_LEGACY: &str = "alignDeg";
    pub const ALIGNMENT_OTHER: &str = "alignOther";
    pub const WALKING: &str = "walkPts";
    pub const STAIRS: &str = "stairsPts";
    pub const AIDS: &str = "aidsDeduction";
}

pub const KNEE: &str = "knee";
pub const FUNCTION: &str = "function";

/// Flexion beyond this earns no extra mobility points.
pub const MAX_SCORED_FLEXION: f64 = 125.0;

/// Degrees of flexion per mobility point.
pub const DEGREES_PER_POINT: f64 = 4.0;

/// Valgus band (degrees) with no alignment deduction.
pub const NEUTRAL_VALGUS: (f64, f64) = (5.0, 10.0);

pub const ALIGNMENT_POINTS_PER_DEGREE: f64 = 3.0;

/// Deduction for "other deformity" and the cap for degree-based ones.
pub const MAX_ALIGNMENT_DEDUCTION: u32 = 20;

const FLEXION_RANGE: ScoreRange = ScoreRange::new(0.0, 180.0);
const DEFICIT_RANGE: ScoreRange = ScoreRange::new(0.0, 90.0);
const ALIGNMENT_RANGE: ScoreRange = ScoreRange::new(-45.0, 45.0);

/// Upper edge of a deduction band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpperEdge {
    /// Measurements strictly below this many degrees.
    Below(f64),
    /// Measurements up to and including this many degrees.
    Through(f64),
    Unbounded,
}

impl UpperEdge {
    fn admits(self, degrees: f64) -> bool {
        match self {
            Self::Below(edge) => degrees < edge,
            Self::Through(edge) => degrees <= edge,
            Self::Unbounded => true,
        }
    }
}

/// A deduction band. Bands are ordered from the lowest; a measurement
/// costs the points of the first band whose upper edge admits it.
#[derive(Debug, Clone, Copy)]
pub struct DegreeBand {
    pub upper: UpperEdge,
    pub points: u32,
    pub label: &'static str,
}

pub const FLEXION_CONTRACTURE_BANDS: &[DegreeBand] = &[
    DegreeBand {
        upper: UpperEdge::Below(5.0),
        points: 0,
        label: "Menos de 5°",
    },
    DegreeBand {
        upper: UpperEdge::Below(10.0),
        points: 5,
        label: "5–9°",
    },
    DegreeBand {
        upper: UpperEdge::Through(20.0),
        points: 10,
        label: "10–20°",
    },
    DegreeBand {
        upper: UpperEdge::Unbounded,
        points: 20,
        label: "Más de 20°",
    },
];

pub const EXTENSION_DEFICIT_BANDS: &[DegreeBand] = &[
    DegreeBand {
        upper: UpperEdge::Through(0.0),
        points: 0,
        label: "Sin déficit",
    },
    DegreeBand {
        upper: UpperEdge::Below(10.0),
        points: 5,
        label: "Menos de 10°",
    },
    DegreeBand {
        upper: UpperEdge::Through(20.0),
        points: 10,
        label: "10–20°",
    },
    DegreeBand {
        upper: UpperEdge::Unbounded,
        points: 15,
        label: "Más de 20°",
    },
];

pub struct Iks;

/// Anatomic alignment as recorded at examination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Signed degrees: positive valgus, negative varus.
    Degrees(f64),
    OtherDeformity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IksDeductions {
    pub flexion_contracture: u32,
    pub extension_deficit: u32,
    pub alignment: u32,
    pub aids: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IksScore {
    pub knee_score: u32,
    /// Pain + mobility + stability.
    pub knee_positive: u32,
    /// Contracture + extension deficit + alignment.
    pub knee_deductions: u32,
    pub mobility_pts: u32,
    pub stability_pts: u32,
    pub function_score: u32,
    pub deductions: IksDeductions,
    /// Usable fields out of [`FIELD_COUNT`].
    pub answered: u32,
}

/// Fields that feed either score; alignment counts once.
pub const FIELD_COUNT: u32 = 10;

impl Instrument for Iks {
    fn kind(&self) -> FormKind {
        FormKind::Iks
    }

    fn name(&self) -> &str {
        "IKS"
    }

    fn sections(&self) -> &[Section] {
        sections()
    }

    fn questions(&self) -> &[Question] {
        questions()
    }

    fn score(&self, answers: &AnswerRecord) -> ScoreSummary {
        ScoreSummary::Iks(score(answers))
    }

    fn scorable_count(&self) -> usize {
        FIELD_COUNT as usize
    }

    fn validate_answers(&self, answers: &AnswerRecord) -> Vec<AnswerIssue> {
        // Signed aid deductions are legal; only the magnitude is checked.
        let aids_ok = aids_deduction(answers).is_some();
        let mut issues: Vec<AnswerIssue> = questions()
            .iter()
            .filter(|q| !(aids_ok && q.id == field::AIDS))
            .filter_map(|q| q.check(answers))
            .collect();

        if !answers.is_answered(field::ALIGNMENT_DEGREES) {
            issues.extend(legacy_alignment_question().check(answers));
        }
        issues
    }

    fn question_answers(&self, answers: &AnswerRecord) -> Vec<QuestionAnswer> {
        question_answers(answers)
    }
}

/// Mobility points for active flexion, one per four degrees, rounded down.
pub fn points_from_flexion(degrees: f64) -> u32 {
    if !degrees.is_finite() || degrees <= 0.0 {
        return 0;
    }
    (degrees.min(MAX_SCORED_FLEXION) / DEGREES_PER_POINT).floor() as u32
}

pub fn deduction_from_flexion_contracture(degrees: f64) -> u32 {
    band_points(FLEXION_CONTRACTURE_BANDS, degrees)
}

pub fn deduction_from_extension_deficit(degrees: f64) -> u32 {
    band_points(EXTENSION_DEFICIT_BANDS, degrees)
}

/// Nothing inside the neutral valgus band, three points per degree outside
/// it on either side, capped at [`MAX_ALIGNMENT_DEDUCTION`].
pub fn deduction_from_alignment(alignment: Alignment) -> u32 {
    let degrees = match alignment {
        Alignment::OtherDeformity => return MAX_ALIGNMENT_DEDUCTION,
        Alignment::Degrees(d) if d.is_finite() => d,
        Alignment::Degrees(_) => return 0,
    };

    let (low, high) = NEUTRAL_VALGUS;
    let outside = if degrees < low {
        low - degrees
    } else if degrees > high {
        degrees - high
    } else {
        0.0
    };

    let points = (outside * ALIGNMENT_POINTS_PER_DEGREE).round() as u32;
    points.min(MAX_ALIGNMENT_DEDUCTION)
}

fn band_points(bands: &[DegreeBand], degrees: f64) -> u32 {
    if !degrees.is_finite() || degrees < 0.0 {
        return 0;
    }
    bands
        .iter()
        .find(|band| band.upper.admits(degrees))
        .map_or(0, |band| band.points)
}

/// The recorded alignment. The "other deformity" flag wins over degrees.
pub fn alignment(answers: &AnswerRecord) -> Option<Alignment> {
    if answers.flag(field::ALIGNMENT_OTHER) == Some(true) {
        return Some(Alignment::OtherDeformity);
    }
    [field::ALIGNMENT_DEGREES, field::ALIGNMENT_DEGREES_LEGACY]
        .into_iter()
        .find_map(|id| answers.number(id))
        .filter(|d| ALIGNMENT_RANGE.contains(*d))
        .map(Alignment::Degrees)
}

/// A walking-aid deduction as a magnitude. Stored values may carry either
/// sign; anything that is not one of the options is unanswered.
pub fn aids_deduction(answers: &AnswerRecord) -> Option<u32> {
    let raw = answers.number(field::AIDS)?.abs();
    question(field::AIDS)
        .filter(|q| q.accepts(raw))
        .map(|_| raw as u32)
}

/// `alignDeg`, read only when `alignDegrees` is absent.
fn legacy_alignment_question() -> &'static Question {
    static LEGACY: std::sync::LazyLock<Question> = std::sync::LazyLock::new(|| {
        Question::degrees(
            field::ALIGNMENT_DEGREES_LEGACY,
            "Alineación anatómica (grados, valgo positivo)",
            ALIGNMENT_RANGE,
        )
    });
    &LEGACY
}

fn question(id: &str) -> Option<&'static Question> {
    questions().iter().find(|q| q.id == id)
}

fn points(answers: &AnswerRecord, id: &str) -> Option<u32> {
    question(id)?.value(answers).map(|v| v as u32)
}

pub fn score(answers: &AnswerRecord) -> IksScore {
    let pain = points(answers, field::PAIN);
    let flexion = question(field::FLEXION).and_then(|q| q.value(answers));
    let ap = points(answers, field::STABILITY_AP);
    let ml = points(answers, field::STABILITY_ML);
    let contracture = question(field::FLEXION_CONTRACTURE).and_then(|q| q.value(answers));
    let extension = question(field::EXTENSION_DEFICIT).and_then(|q| q.value(answers));
    let align = alignment(answers);
    let walk = points(answers, field::WALKING);
    let stairs = points(answers, field::STAIRS);
    let aids = aids_deduction(answers);

    let answered = [
        pain.is_some(),
        flexion.is_some(),
        ap.is_some(),
        ml.is_some(),
        contracture.is_some(),
        extension.is_some(),
        align.is_some(),
        walk.is_some(),
        stairs.is_some(),
        aids.is_some(),
    ]
    .into_iter()
    .filter(|&a| a)
    .count() as u32;

    let mobility_pts = flexion.map_or(0, points_from_flexion);
    let stability_pts = ap.unwrap_or(0) + ml.unwrap_or(0);
    let knee_positive = pain.unwrap_or(0) + mobility_pts + stability_pts;

    let deductions = IksDeductions {
        flexion_contracture: contracture.map_or(0, deduction_from_flexion_contracture),
        extension_deficit: extension.map_or(0, deduction_from_extension_deficit),
        alignment: align.map_or(0, deduction_from_alignment),
        aids: aids.unwrap_or(0),
    };
    let knee_deductions =
        deductions.flexion_contracture + deductions.extension_deficit + deductions.alignment;

    let knee_score = knee_positive.saturating_sub(knee_deductions).min(100);
    let function_score = (walk.unwrap_or(0) + stairs.unwrap_or(0))
        .saturating_sub(deductions.aids)
        .min(100);

    IksScore {
        knee_score,
        knee_positive,
        knee_deductions,
        mobility_pts,
        stability_pts,
        function_score,
        deductions,
        answered,
    }
}

/// Detail lines with the points each finding awarded or cost.
pub fn question_answers(answers: &AnswerRecord) -> Vec<QuestionAnswer> {
    let result = score(answers);
    let section_title = |key: &str| {
        sections()
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.title.clone())
    };

    let with_points = |id: &str, awarded: i64| -> String {
        let Some(q) = question(id) else {
            return NO_ANSWER.to_string();
        };
        match q.value(answers) {
            Some(v) => {
                let label = q
                    .option_label(v)
                    .map(str::to_string)
                    .unwrap_or_else(|| v.to_string());
                format!("{label}{}", points_label(awarded))
            }
            None => NO_ANSWER.to_string(),
        }
    };

    let degrees = |id: &str, awarded: i64| -> String {
        match question(id).and_then(|q| q.value(answers)) {
            Some(v) => format!("{v}°{}", points_label(awarded)),
            None => NO_ANSWER.to_string(),
        }
    };

    let alignment_text = match alignment(answers) {
        Some(Alignment::OtherDeformity) => format!(
            "Otra deformidad{}",
            points_label(-i64::from(result.deductions.alignment))
        ),
        Some(Alignment::Degrees(d)) => {
            format!("{d}°{}", points_label(-i64::from(result.deductions.alignment)))
        }
        None => NO_ANSWER.to_string(),
    };

    let aids_text = match aids_deduction(answers) {
        Some(magnitude) => {
            let label = question(field::AIDS)
                .and_then(|q| q.option_label(f64::from(magnitude)))
                .unwrap_or_default();
            format!("{label}{}", points_label(-i64::from(magnitude)))
        }
        None => NO_ANSWER.to_string(),
    };

    let knee = section_title(KNEE);
    let function = section_title(FUNCTION);
    let line = |id: &str, text: &str, answer: String, section: &Option<String>| QuestionAnswer {
        id: id.to_string(),
        text: text.to_string(),
        answer,
        section: section.clone(),
    };
    let pts = |id: &str| points(answers, id).map_or(0, i64::from);

    vec![
        line(field::PAIN, "Dolor", with_points(field::PAIN, pts(field::PAIN)), &knee),
        line(
            field::FLEXION,
            "Flexión activa máxima",
            degrees(field::FLEXION, i64::from(result.mobility_pts)),
            &knee,
        ),
        line(
            field::STABILITY_AP,
            "Estabilidad anteroposterior",
            with_points(field::STABILITY_AP, pts(field::STABILITY_AP)),
            &knee,
        ),
        line(
            field::STABILITY_ML,
            "Estabilidad medio-lateral",
            with_points(field::STABILITY_ML, pts(field::STABILITY_ML)),
            &knee,
        ),
        line(
            field::FLEXION_CONTRACTURE,
            "Contractura en flexión",
            degrees(
                field::FLEXION_CONTRACTURE,
                -i64::from(result.deductions.flexion_contracture),
            ),
            &knee,
        ),
        line(
            field::EXTENSION_DEFICIT,
            "Déficit de extensión activa",
            degrees(
                field::EXTENSION_DEFICIT,
                -i64::from(result.deductions.extension_deficit),
            ),
            &knee,
        ),
        line("alignment", "Alineación anatómica", alignment_text, &knee),
        line(
            field::WALKING,
            "Marcha",
            with_points(field::WALKING, pts(field::WALKING)),
            &function,
        ),
        line(
            field::STAIRS,
            "Escaleras",
            with_points(field::STAIRS, pts(field::STAIRS)),
            &function,
        ),
        line(field::AIDS, "Uso de ayudas", aids_text, &function),
    ]
}

pub fn sections() -> &'static [Section] {
    static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
        vec![
            Section::new(
                KNEE,
                "Puntuación de rodilla",
                "Dolor, movilidad y estabilidad, con deducciones por contractura, déficit de extensión y alineación",
            ),
            Section::new(
                FUNCTION,
                "Puntuación funcional",
                "Marcha y escaleras, con deducción por uso de ayudas",
            ),
        ]
    });
    &SECTIONS
}

pub fn questions() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        vec![
            Question::choice(
                field::PAIN,
                "Dolor",
                &[
                    ("Ninguno", 50.0),
                    ("Leve u ocasional", 45.0),
                    ("Leve, solo en escaleras", 40.0),
                    ("Leve, al caminar y en escaleras", 30.0),
                    ("Moderado, ocasional", 20.0),
                    ("Moderado, continuo", 10.0),
                    ("Severo", 0.0),
                ],
            )
            .in_section(KNEE),
            Question::degrees(field::FLEXION, "Flexión activa máxima", FLEXION_RANGE)
                .in_section(KNEE),
            Question::choice(
                field::STABILITY_AP,
                "Estabilidad anteroposterior",
                &[("Menos de 5 mm", 10.0), ("5–10 mm", 5.0), ("Más de 10 mm", 0.0)],
            )
            .in_section(KNEE),
            Question::choice(
                field::STABILITY_ML,
                "Estabilidad medio-lateral",
                &[
                    ("Menos de 5°", 15.0),
                    ("6–9°", 10.0),
                    ("10–14°", 5.0),
                    ("15° o más", 0.0),
                ],
            )
            .in_section(KNEE),
            Question::degrees(
                field::FLEXION_CONTRACTURE,
                "Contractura en flexión",
                DEFICIT_RANGE,
            )
            .in_section(KNEE),
            Question::degrees(
                field::EXTENSION_DEFICIT,
                "Déficit de extensión activa",
                DEFICIT_RANGE,
            )
            .in_section(KNEE),
            Question::degrees(
                field::ALIGNMENT_DEGREES,
                "Alineación anatómica (grados, valgo positivo)",
                ALIGNMENT_RANGE,
            )
            .in_section(KNEE),
            Question::flag(field::ALIGNMENT_OTHER, "Otra deformidad").in_section(KNEE),
            Question::choice(
                field::WALKING,
                "Marcha",
                &[
                    ("Ilimitada", 50.0),
                    ("Más de 10 cuadras", 40.0),
                    ("5–10 cuadras", 30.0),
                    ("Menos de 5 cuadras", 20.0),
                    ("Solo dentro de casa", 10.0),
                    ("Incapaz", 0.0),
                ],
            )
            .in_section(FUNCTION),
            Question::choice(
                field::STAIRS,
                "Escaleras",
                &[
                    ("Sube y baja normalmente", 50.0),
                    ("Sube normal, baja con barandal", 40.0),
                    ("Sube y baja con barandal", 30.0),
                    ("Sube con barandal, incapaz de bajar", 15.0),
                    ("Incapaz", 0.0),
                ],
            )
            .in_section(FUNCTION),
            Question::choice(
                field::AIDS,
                "Uso de ayudas",
                &[
                    ("Ninguna", 0.0),
                    ("Bastón", 5.0),
                    ("Dos bastones", 10.0),
                    ("Muletas o andadera", 20.0),
                ],
            )
            .in_section(FUNCTION),
        ]
    });
    &QUESTIONS
}
