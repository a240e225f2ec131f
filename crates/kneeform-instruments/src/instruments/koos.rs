use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::{Question, ScoreSummary, Section, round_score};

pub const SYMPTOMS: &str = "symptoms";
pub const PAIN: &str = "pain";
pub const ADL: &str = "adl";
pub const SPORT: &str = "sport";
pub const QOL: &str = "qol";

/// Subscale keys in display order.
pub const SUBSCALES: [&str; 5] = [SYMPTOMS, PAIN, ADL, SPORT, QOL];

/// Points of the worst answer of any KOOS item.
pub const MAX_ITEM_POINTS: f64 = 4.0;

/// KOOS: Knee injury and Osteoarthritis Outcome Score.
/// 42 items in five independently scored subscales; 0 = worst, 100 = best.
pub struct Koos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KoosSubscale {
    pub valid: bool,
    pub score: Option<u32>,
    pub answered: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KoosScores {
    pub symptoms: KoosSubscale,
    pub pain: KoosSubscale,
    pub adl: KoosSubscale,
    pub sport: KoosSubscale,
    pub qol: KoosSubscale,
}

impl KoosScores {
    pub fn get(&self, key: &str) -> Option<&KoosSubscale> {
        match key {
            SYMPTOMS => Some(&self.symptoms),
            PAIN => Some(&self.pain),
            ADL => Some(&self.adl),
            SPORT => Some(&self.sport),
            QOL => Some(&self.qol),
            _ => None,
        }
    }

    /// `(key, result)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &KoosSubscale)> {
        SUBSCALES
            .into_iter()
            .filter_map(move |key| self.get(key).map(|s| (key, s)))
    }
}

impl Instrument for Koos {
    fn kind(&self) -> FormKind {
        FormKind::Koos
    }

    fn name(&self) -> &str {
        "KOOS"
    }

    fn sections(&self) -> &[Section] {
        sections()
    }

    fn questions(&self) -> &[Question] {
        questions()
    }

    fn score(&self, answers: &AnswerRecord) -> ScoreSummary {
        ScoreSummary::Koos(score(answers))
    }
}

pub fn score(answers: &AnswerRecord) -> KoosScores {
    KoosScores {
        symptoms: score_subscale(answers, SYMPTOMS),
        pain: score_subscale(answers, PAIN),
        adl: score_subscale(answers, ADL),
        sport: score_subscale(answers, SPORT),
        qol: score_subscale(answers, QOL),
    }
}

/// Score one subscale: `100 − mean item points / 4 × 100`.
///
/// Valid only when at least half of the subscale's items are answered.
pub fn score_subscale(answers: &AnswerRecord, key: &str) -> KoosSubscale {
    let items: Vec<&Question> = questions()
        .iter()
        .filter(|q| q.section.as_deref() == Some(key))
        .collect();

    let (sum, answered) = items
        .iter()
        .filter_map(|q| q.value(answers))
        .fold((0.0, 0u32), |(sum, n), points| (sum + points, n + 1));

    let item_count = items.len() as u32;
    if item_count == 0 || answered * 2 < item_count {
        return KoosSubscale {
            valid: false,
            score: None,
            answered,
        };
    }

    let score = round_score(100.0 - sum / (f64::from(answered) * MAX_ITEM_POINTS) * 100.0);
    KoosSubscale {
        valid: true,
        score: Some(score),
        answered,
    }
}

/// Items in a subscale.
pub fn item_count(key: &str) -> usize {
    questions()
        .iter()
        .filter(|q| q.section.as_deref() == Some(key))
        .count()
}

pub fn sections() -> &'static [Section] {
    static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
        vec![
            Section::new(
                SYMPTOMS,
                "Síntomas y rigidez",
                "Piense en los síntomas de su rodilla durante la última semana.",
            ),
            Section::new(
                PAIN,
                "Dolor",
                "¿Cuánto dolor ha tenido en la rodilla durante la última semana al realizar estas actividades?",
            ),
            Section::new(
                ADL,
                "Actividades de la vida diaria",
                "Indique el grado de dificultad que ha tenido durante la última semana debido a su rodilla.",
            ),
            Section::new(
                SPORT,
                "Deporte y recreación",
                "Indique el grado de dificultad durante la última semana en actividades de mayor exigencia.",
            ),
            Section::new(
                QOL,
                "Calidad de vida",
                "Piense en cómo afecta su rodilla a su calidad de vida.",
            ),
        ]
    });
    &SECTIONS
}

pub fn questions() -> &'static [Question] {
    static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        let frequency = [
            ("Nunca", 0.0),
            ("Rara vez", 1.0),
            ("A veces", 2.0),
            ("A menudo", 3.0),
            ("Siempre", 4.0),
        ];
        let severity = [
            ("Nada", 0.0),
            ("Poco", 1.0),
            ("Moderado", 2.0),
            ("Mucho", 3.0),
            ("Muchísimo", 4.0),
        ];
        let mobility = [
            ("Siempre", 0.0),
            ("A menudo", 1.0),
            ("A veces", 2.0),
            ("Rara vez", 3.0),
            ("Nunca", 4.0),
        ];
        let awareness = [
            ("Nunca", 0.0),
            ("Una vez al mes", 1.0),
            ("Una vez a la semana", 2.0),
            ("Diariamente", 3.0),
            ("Constantemente", 4.0),
        ];
        let modified = [
            ("En absoluto", 0.0),
            ("Levemente", 1.0),
            ("Moderadamente", 2.0),
            ("Severamente", 3.0),
            ("Totalmente", 4.0),
        ];
        let confidence = [
            ("En absoluto", 0.0),
            ("Levemente", 1.0),
            ("Moderadamente", 2.0),
            ("Severamente", 3.0),
            ("Extremadamente", 4.0),
        ];

        let mut questions = Vec::new();
        let mut push = |id: &str, text: &str, options: &[(&str, f64)], section: &str| {
            questions.push(Question::choice(id, text, options).in_section(section));
        };

        push("S1", "¿Se le hincha la rodilla?", &frequency, SYMPTOMS);
        push(
            "S2",
            "¿Siente chasquidos, crujidos u otros ruidos al mover la rodilla?",
            &frequency,
            SYMPTOMS,
        );
        push(
            "S3",
            "¿Se le engancha o bloquea la rodilla al moverla?",
            &frequency,
            SYMPTOMS,
        );
        push("S4", "¿Puede estirar la rodilla por completo?", &mobility, SYMPTOMS);
        push("S5", "¿Puede doblar la rodilla por completo?", &mobility, SYMPTOMS);
        push(
            "S6",
            "¿Cuánta rigidez siente en la rodilla al despertar por la mañana?",
            &severity,
            SYMPTOMS,
        );
        push(
            "S7",
            "¿Cuánta rigidez siente en la rodilla al final del día, tras estar sentado o descansar?",
            &severity,
            SYMPTOMS,
        );

        push("P1", "¿Con qué frecuencia le duele la rodilla?", &awareness, PAIN);
        let pain_items = [
            ("P2", "Girar o pivotar sobre la rodilla"),
            ("P3", "Estirar la rodilla por completo"),
            ("P4", "Doblar la rodilla por completo"),
            ("P5", "Caminar sobre una superficie plana"),
            ("P6", "Subir o bajar escaleras"),
            ("P7", "Por la noche en la cama"),
            ("P8", "Sentado o acostado"),
            ("P9", "De pie"),
        ];
        for (id, text) in pain_items {
            push(id, text, &severity, PAIN);
        }

        let adl_items = [
            ("A1", "Bajar escaleras"),
            ("A2", "Subir escaleras"),
            ("A3", "Levantarse de estar sentado"),
            ("A4", "Estar de pie"),
            ("A5", "Agacharse para recoger algo del suelo"),
            ("A6", "Caminar sobre una superficie plana"),
            ("A7", "Entrar o salir de un coche"),
            ("A8", "Ir de compras"),
            ("A9", "Ponerse los calcetines o medias"),
            ("A10", "Levantarse de la cama"),
            ("A11", "Quitarse los calcetines o medias"),
            ("A12", "Estar acostado en la cama (darse vuelta, mantener la rodilla en una posición)"),
            ("A13", "Entrar o salir de la bañera o ducha"),
            ("A14", "Estar sentado"),
            ("A15", "Sentarse o levantarse del inodoro"),
            ("A16", "Tareas domésticas pesadas"),
            ("A17", "Tareas domésticas ligeras"),
        ];
        for (id, text) in adl_items {
            push(id, text, &severity, ADL);
        }

        let sport_items = [
            ("SP1", "Ponerse en cuclillas"),
            ("SP2", "Correr"),
            ("SP3", "Saltar"),
            ("SP4", "Girar o pivotar sobre la rodilla lesionada"),
            ("SP5", "Arrodillarse"),
        ];
        for (id, text) in sport_items {
            push(id, text, &severity, SPORT);
        }

        push(
            "Q1",
            "¿Con qué frecuencia es consciente de su problema de rodilla?",
            &awareness,
            QOL,
        );
        push(
            "Q2",
            "¿Ha modificado su estilo de vida para evitar actividades que puedan dañar su rodilla?",
            &modified,
            QOL,
        );
        push(
            "Q3",
            "¿Cuánto le preocupa la falta de confianza en su rodilla?",
            &confidence,
            QOL,
        );
        push(
            "Q4",
            "En general, ¿cuántas dificultades le causa su rodilla?",
            &confidence,
            QOL,
        );

        questions
    });
    &QUESTIONS
}
