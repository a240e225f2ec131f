use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Question, ScoreSummary, round_score};

/// Fewer scorable answers than this and the score is not reported.
pub const MIN_ANSWERED: u32 = 16;

/// Weight of a fully-scored item. Every answer is rescaled to 0–4 before
/// summing, whatever its native range.
pub const MAX_ITEM_POINTS: f64 = 4.0;

/// IKDC Subjective Knee Evaluation Form.
/// 19 collected items, 18 scored; 0–100, higher = better function.
pub struct Ikdc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IkdcScore {
    pub valid: bool,
    pub score: Option<u32>,
    pub answered: u32,
}

impl Instrument for Ikdc {
    fn kind(&self) -> FormKind {
        FormKind::Ikdc
    }

    fn name(&self) -> &str {
        "IKDC"
    }

    fn questions(&self) -> &[Question] {
        questions()
    }

    fn score(&self, answers: &AnswerRecord) -> ScoreSummary {
        ScoreSummary::Ikdc(score(answers))
    }
}

pub fn score(answers: &AnswerRecord) -> IkdcScore {
    let (sum, answered) = questions()
        .iter()
        .filter(|q| !q.excluded_from_score)
        .filter_map(|q| {
            q.value(answers)
                .map(|value| value * MAX_ITEM_POINTS / q.max_value())
        })
        .fold((0.0, 0u32), |(sum, n), points| (sum + points, n + 1));

    if answered < MIN_ANSWERED {
        return IkdcScore {
            valid: false,
            score: None,
            answered,
        };
    }

    let score = round_score(sum / (f64::from(answered) * MAX_ITEM_POINTS) * 100.0);
    IkdcScore {
        valid: true,
        score: Some(score),
        answered,
    }
}

pub fn questions() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        let activity_without_pain = [
            ("Actividades muy agotadoras (saltar/girar, básquet/fútbol)", 4.0),
            ("Actividades agotadoras (trabajo físico pesado, esquiar/tenis)", 3.0),
            ("Actividades moderadas (correr/jogging, trabajo moderado)", 2.0),
            ("Actividades ligeras (caminar, tareas en casa/jardín)", 1.0),
            ("No puedo realizar ninguna de las anteriores por dolor", 0.0),
        ];

        let activity = [
            ("Actividades muy agotadoras (saltar/girar…)", 4.0),
            ("Actividades agotadoras (trabajo físico pesado…)", 3.0),
            ("Actividades moderadas (correr/jogging…)", 2.0),
            ("Actividades ligeras (caminar, tareas en casa…)", 1.0),
            ("No puedo realizar ninguna de las anteriores", 0.0),
        ];

        let regular_activity = [
            ("Actividades muy agotadoras", 4.0),
            ("Actividades agotadoras", 3.0),
            ("Actividades moderadas", 2.0),
            ("Actividades ligeras", 1.0),
            ("No puedo realizar ninguna de las anteriores", 0.0),
        ];

        let difficulty = [
            ("Ninguna dificultad", 4.0),
            ("Dificultad mínima", 3.0),
            ("Dificultad moderada", 2.0),
            ("Sumamente difícil", 1.0),
            ("No puedo hacerlo", 0.0),
        ];

        let mut questions = vec![
            Question::choice(
                "q1_activity_without_pain",
                "¿Cuál es el nivel más alto de actividad que puede realizar sin sentir dolor en la rodilla?",
                &activity_without_pain,
            ),
            Question::scale(
                "q2_pain_frequency",
                "Durante las últimas 4 semanas o desde la lesión, ¿con cuánta frecuencia ha tenido dolor? (Nunca = 10, Constantemente = 0)",
                10.0,
            ),
            Question::scale(
                "q3_pain_intensity",
                "Marque la intensidad del dolor (Ningún dolor = 10, Peor dolor imaginable = 0)",
                10.0,
            ),
            Question::choice(
                "q4_stiffness_swelling",
                "Durante las últimas 4 semanas, ¿qué tan rígida o hinchada estuvo su rodilla?",
                &[
                    ("Nada", 4.0),
                    ("Poco", 3.0),
                    ("Moderadamente", 2.0),
                    ("Mucho", 1.0),
                    ("Muchísimo", 0.0),
                ],
            ),
            Question::choice(
                "q5_activity_without_swelling",
                "¿Cuál es el nivel más alto de actividad que puede realizar sin que la rodilla se hinche de forma considerable?",
                &activity,
            ),
            Question::choice(
                "q6_locking",
                "Durante las últimas 4 semanas, ¿se le ha bloqueado/trabado temporalmente la rodilla?",
                &[("Sí", 0.0), ("No", 1.0)],
            ),
            Question::choice(
                "q7_activity_without_giving_way",
                "¿Cuál es el nivel más alto de actividad que puede hacer sin que la rodilla le falle?",
                &activity,
            ),
            Question::choice(
                "q8_highest_regular_activity",
                "¿Cuál es el nivel más alto de actividad que puede efectuar de forma habitual?",
                &regular_activity,
            ),
        ];

        let daily = [
            ("q9a_stairs_up", "Subir escaleras"),
            ("q9b_stairs_down", "Bajar escaleras"),
            ("q9c_kneeling", "Arrodillarse sobre la parte delantera de la rodilla"),
            ("q9d_squatting", "Ponerse en cuclillas"),
            ("q9e_sitting_bent", "Sentarse con la rodilla doblada"),
            ("q9f_stand_from_chair", "Levantarse de una silla"),
            ("q9g_run_straight", "Correr hacia delante en línea recta"),
            ("q9h_jump_land", "Saltar y caer sobre la pierna afectada"),
            ("q9i_stop_start", "Parar y comenzar rápidamente a caminar o correr"),
        ];
        questions.extend(daily.iter().map(|(id, label)| {
            Question::choice(
                id,
                &format!("Debido a su rodilla, nivel de dificultad para: {label}"),
                &difficulty,
            )
        }));

        questions.push(
            Question::scale(
                "q10a_function_pre_injury",
                "Funcionamiento de su rodilla ANTES de la lesión (0 = nulo, 10 = óptimo)",
                10.0,
            )
            .excluded(),
        );
        questions.push(Question::scale(
            "q10b_function_current",
            "Funcionamiento ACTUAL de su rodilla (0 = nulo, 10 = óptimo)",
            10.0,
        ));

        questions
    });
    &QUESTIONS
}
