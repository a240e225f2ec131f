use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Band, Interpretation, Question, ScoreSummary, Section, interpret, round_score};

pub const PAIN: &str = "pain";
pub const STIFFNESS: &str = "stiffness";
pub const FUNCTION: &str = "function";

/// Severity on the total percentage, highest first.
pub const SEVERITY_BANDS: &[Band] = &[
    Band {
        min: 51,
        label: "Severo",
        color: "#ef4444",
    },
    Band {
        min: 25,
        label: "Moderado",
        color: "#f59e0b",
    },
    Band {
        min: 0,
        label: "Leve",
        color: "#22c55e",
    },
];

/// WOMAC Osteoarthritis Index.
/// 24 items in Pain (5), Stiffness (2) and Function (17), each 0–4, higher = worse.
pub struct Womac;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WomacSubscales {
    pub pain: u32,
    pub stiffness: u32,
    pub function: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WomacScore {
    /// Percent of the worst possible result over the answered items only.
    pub normalized: WomacSubscales,
    /// Raw point sums.
    pub raw: WomacSubscales,
    pub answered: u32,
    pub max_answered: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WomacSummary {
    pub womac_score: WomacScore,
    pub severity: Interpretation,
}

impl Instrument for Womac {
    fn kind(&self) -> FormKind {
        FormKind::Womac
    }

    fn name(&self) -> &str {
        "WOMAC"
    }

    fn sections(&self) -> &[Section] {
        sections()
    }

    fn questions(&self) -> &[Question] {
        questions()
    }

    fn score(&self, answers: &AnswerRecord) -> ScoreSummary {
        let womac_score = score(answers);
        ScoreSummary::Womac(WomacSummary {
            severity: severity_label(womac_score.normalized.total),
            womac_score,
        })
    }
}

#[derive(Default, Clone, Copy)]
struct Tally {
    sum: f64,
    max: f64,
    answered: u32,
}

impl Tally {
    fn add(&mut self, points: f64, max: f64) {
        self.sum += points;
        self.max += max;
        self.answered += 1;
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            sum: self.sum + other.sum,
            max: self.max + other.max,
            answered: self.answered + other.answered,
        }
    }

    /// 0 when nothing in the group was answered.
    fn percent(&self) -> u32 {
        if self.max <= 0.0 {
            return 0;
        }
        round_score(self.sum / self.max * 100.0)
    }
}

pub fn score(answers: &AnswerRecord) -> WomacScore {
    let mut pain = Tally::default();
    let mut stiffness = Tally::default();
    let mut function = Tally::default();

    for question in questions() {
        let Some(points) = question.value(answers) else {
            continue;
        };
        let tally = match question.section.as_deref() {
            Some(PAIN) => &mut pain,
            Some(STIFFNESS) => &mut stiffness,
            Some(FUNCTION) => &mut function,
            _ => continue,
        };
        tally.add(points, question.max_value());
    }

    let total = pain.merge(stiffness).merge(function);

    WomacScore {
        normalized: WomacSubscales {
            pain: pain.percent(),
            stiffness: stiffness.percent(),
            function: function.percent(),
            total: total.percent(),
        },
        raw: WomacSubscales {
            pain: pain.sum as u32,
            stiffness: stiffness.sum as u32,
            function: function.sum as u32,
            total: total.sum as u32,
        },
        answered: total.answered,
        max_answered: questions().len() as u32,
    }
}

/// Severity of a total WOMAC percentage.
pub fn severity_label(total: u32) -> Interpretation {
    interpret(SEVERITY_BANDS, total)
}

pub fn sections() -> &'static [Section] {
    static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
        vec![
            Section::new(
                PAIN,
                "Dolor",
                "¿Cuánto dolor ha tenido en las últimas 48 horas al realizar las siguientes actividades?",
            ),
            Section::new(
                STIFFNESS,
                "Rigidez",
                "¿Qué tan intensa ha sido la rigidez de su rodilla en las últimas 48 horas?",
            ),
            Section::new(
                FUNCTION,
                "Capacidad funcional",
                "¿Qué grado de dificultad ha tenido en las últimas 48 horas al realizar las siguientes actividades?",
            ),
        ]
    });
    &SECTIONS
}

pub fn questions() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        let severity = [
            ("Ninguno", 0.0),
            ("Poco", 1.0),
            ("Bastante", 2.0),
            ("Mucho", 3.0),
            ("Muchísimo", 4.0),
        ];

        let groups: [(&str, &str, &[&str]); 3] = [
            (
                PAIN,
                "p",
                &[
                    "Al andar por un terreno llano",
                    "Al subir o bajar escaleras",
                    "Por la noche en la cama",
                    "Al estar sentado o tumbado",
                    "Al estar de pie",
                ],
            ),
            (
                STIFFNESS,
                "s",
                &[
                    "Rigidez al despertarse por la mañana",
                    "Rigidez durante el resto del día, después de estar sentado, tumbado o descansando",
                ],
            ),
            (
                FUNCTION,
                "f",
                &[
                    "Bajar escaleras",
                    "Subir escaleras",
                    "Levantarse después de estar sentado",
                    "Estar de pie",
                    "Agacharse para coger algo del suelo",
                    "Andar por un terreno llano",
                    "Entrar y salir de un coche",
                    "Ir de compras",
                    "Ponerse los calcetines o las medias",
                    "Levantarse de la cama",
                    "Quitarse los calcetines o las medias",
                    "Estar tumbado en la cama",
                    "Entrar y salir de la ducha o bañera",
                    "Estar sentado",
                    "Sentarse y levantarse del retrete",
                    "Hacer tareas domésticas pesadas",
                    "Hacer tareas domésticas ligeras",
                ],
            ),
        ];

        groups
            .iter()
            .flat_map(|(section, prefix, items)| {
                items.iter().enumerate().map(move |(i, text)| {
                    Question::choice(&format!("{prefix}{}", i + 1), text, &severity)
                        .in_section(section)
                })
            })
            .collect()
    });
    &QUESTIONS
}
