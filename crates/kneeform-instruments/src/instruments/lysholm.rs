use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Band, Interpretation, Question, ScoreSummary, interpret, round_score};

/// Id of the Tegner activity question collected alongside the Lysholm items.
pub const TEGNER_ID: &str = "tegner_level";

/// Lysholm bands, highest first.
pub const BANDS: &[Band] = &[
    Band {
        min: 95,
        label: "Excelente",
        color: "#22c55e",
    },
    Band {
        min: 84,
        label: "Bueno",
        color: "#84cc16",
    },
    Band {
        min: 65,
        label: "Regular",
        color: "#f59e0b",
    },
    Band {
        min: 0,
        label: "Malo",
        color: "#ef4444",
    },
];

/// Reported instead of a band when nothing was answered.
pub const UNANSWERED: Band = Band {
    min: 0,
    label: "Sin respuestas",
    color: "#94a3b8",
};

/// Lysholm Knee Scoring Scale with the Tegner Activity Level.
/// 8 weighted domains summing to 100; Tegner 0–10 is collected but not scored.
pub struct LysholmTegner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LysholmScore {
    /// Sum of the answered domains, never rescaled.
    pub score: u32,
    pub answered_count: u32,
}

impl LysholmScore {
    pub fn interpretation(&self) -> Interpretation {
        if self.answered_count == 0 {
            return UNANSWERED.interpretation();
        }
        interpret_lysholm(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TegnerLevel {
    pub value: Option<u32>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LysholmSummary {
    pub lysholm_score: LysholmScore,
    pub interpretation: Interpretation,
    pub tegner_value: Option<u32>,
    pub tegner_label: Option<String>,
}

impl Instrument for LysholmTegner {
    fn kind(&self) -> FormKind {
        FormKind::LysholmTegner
    }

    fn name(&self) -> &str {
        "Lysholm-Tegner"
    }

    fn questions(&self) -> &[Question] {
        questions()
    }

    fn score(&self, answers: &AnswerRecord) -> ScoreSummary {
        let lysholm_score = score(answers);
        let tegner = tegner(answers);
        ScoreSummary::Lysholm(LysholmSummary {
            lysholm_score,
            interpretation: lysholm_score.interpretation(),
            tegner_value: tegner.value,
            tegner_label: tegner.label,
        })
    }
}

pub fn score(answers: &AnswerRecord) -> LysholmScore {
    let (sum, answered_count) = questions()
        .iter()
        .filter(|q| !q.excluded_from_score)
        .filter_map(|q| q.value(answers))
        .fold((0.0, 0u32), |(sum, n), points| (sum + points, n + 1));

    LysholmScore {
        score: round_score(sum),
        answered_count,
    }
}

pub fn interpret_lysholm(score: u32) -> Interpretation {
    interpret(BANDS, score)
}

/// Look up the Tegner activity description for the stored level.
pub fn tegner(answers: &AnswerRecord) -> TegnerLevel {
    let Some(question) = questions().iter().find(|q| q.id == TEGNER_ID) else {
        return TegnerLevel {
            value: None,
            label: None,
        };
    };
    match question.value(answers) {
        Some(level) => TegnerLevel {
            value: Some(level as u32),
            label: question.option_label(level).map(str::to_string),
        },
        None => TegnerLevel {
            value: None,
            label: None,
        },
    }
}

pub fn questions() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        vec![
            Question::choice(
                "limp",
                "Cojera",
                &[
                    ("Nunca", 5.0),
                    ("Leve o de vez en cuando", 3.0),
                    ("Severa y constante", 0.0),
                ],
            ),
            Question::choice(
                "support",
                "Uso de apoyo",
                &[
                    ("Ninguno", 5.0),
                    ("Bastón o muletas", 2.0),
                    ("Imposible apoyar peso", 0.0),
                ],
            ),
            Question::choice(
                "locking",
                "Bloqueo",
                &[
                    ("Sin bloqueo ni sensación de enganche", 15.0),
                    ("Sensación de enganche sin bloqueo", 10.0),
                    ("Bloqueo ocasional", 6.0),
                    ("Bloqueo frecuente", 2.0),
                    ("Rodilla bloqueada al examen", 0.0),
                ],
            ),
            Question::choice(
                "instability",
                "Inestabilidad",
                &[
                    ("Nunca falla", 25.0),
                    ("Rara vez, durante actividades deportivas u otros esfuerzos intensos", 20.0),
                    ("Frecuentemente durante actividades deportivas u otros esfuerzos intensos", 15.0),
                    ("Ocasionalmente durante las actividades diarias", 10.0),
                    ("A menudo durante las actividades diarias", 5.0),
                    ("En cada paso", 0.0),
                ],
            ),
            Question::choice(
                "pain",
                "Dolor",
                &[
                    ("Ninguno", 25.0),
                    ("Inconstante y leve durante esfuerzos intensos", 20.0),
                    ("Marcado durante esfuerzos intensos", 15.0),
                    ("Marcado al caminar más de 2 km o después", 10.0),
                    ("Marcado al caminar menos de 2 km o después", 5.0),
                    ("Constante", 0.0),
                ],
            ),
            Question::choice(
                "swelling",
                "Hinchazón",
                &[
                    ("Ninguna", 10.0),
                    ("Con esfuerzos intensos", 6.0),
                    ("Con esfuerzos ordinarios", 2.0),
                    ("Constante", 0.0),
                ],
            ),
            Question::choice(
                "stairs",
                "Subir escaleras",
                &[
                    ("Sin problemas", 10.0),
                    ("Levemente alterado", 6.0),
                    ("Un escalón a la vez", 2.0),
                    ("Imposible", 0.0),
                ],
            ),
            Question::choice(
                "squatting",
                "Ponerse en cuclillas",
                &[
                    ("Sin problemas", 5.0),
                    ("Levemente alterado", 4.0),
                    ("No más allá de 90°", 2.0),
                    ("Imposible", 0.0),
                ],
            ),
            Question::choice(
                TEGNER_ID,
                "Nivel de actividad de Tegner",
                &[
                    ("Baja laboral o pensión por discapacidad debido a la rodilla", 0.0),
                    ("Trabajo sedentario", 1.0),
                    ("Trabajo ligero; caminar en terreno irregular, sin poder hacer senderismo", 2.0),
                    ("Trabajo ligero (p. ej. enfermería)", 3.0),
                    ("Trabajo moderadamente pesado; ciclismo, esquí de fondo o trotar en terreno llano 2 veces por semana", 4.0),
                    ("Trabajo pesado; ciclismo o esquí de fondo competitivo; trotar en terreno irregular 2 veces por semana", 5.0),
                    ("Deportes recreativos: tenis, bádminton, balonmano, esquí alpino, trotar 5 veces por semana", 6.0),
                    ("Deportes competitivos: tenis, atletismo, baloncesto; fútbol o hockey recreativo", 7.0),
                    ("Deportes competitivos: squash, bádminton, atletismo de saltos, esquí alpino", 8.0),
                    ("Deportes competitivos: fútbol en divisiones inferiores, hockey sobre hielo, lucha, gimnasia", 9.0),
                    ("Deportes competitivos: fútbol a nivel nacional o internacional", 10.0),
                ],
            )
            .excluded(),
        ]
    });
    &QUESTIONS
}
