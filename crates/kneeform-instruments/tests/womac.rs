use kneeform_core::models::answer::AnswerRecord;
use kneeform_instruments::Instrument;
use kneeform_instruments::instruments::womac::{self, Womac, severity_label};
use kneeform_instruments::scoring::ScoreSummary;

fn all_at(points: u32) -> AnswerRecord {
    womac::questions()
        .iter()
        .fold(AnswerRecord::new(), |r, q| r.with(q.id.clone(), points))
}

#[test]
fn twenty_four_items_in_three_subscales() {
    let questions = womac::questions();
    assert_eq!(questions.len(), 24);
    let count = |key: &str| {
        questions
            .iter()
            .filter(|q| q.section.as_deref() == Some(key))
            .count()
    };
    assert_eq!(count(womac::PAIN), 5);
    assert_eq!(count(womac::STIFFNESS), 2);
    assert_eq!(count(womac::FUNCTION), 17);
}

#[test]
fn no_problems_is_zero_percent() {
    let result = womac::score(&all_at(0));
    assert_eq!(result.normalized.total, 0);
    assert_eq!(result.answered, 24);
    assert_eq!(result.max_answered, 24);
    assert_eq!(severity_label(result.normalized.total).label, "Leve");
}

#[test]
fn worst_answers_are_one_hundred_percent() {
    let result = womac::score(&all_at(4));
    assert_eq!(result.normalized.pain, 100);
    assert_eq!(result.normalized.stiffness, 100);
    assert_eq!(result.normalized.function, 100);
    assert_eq!(result.normalized.total, 100);
    assert_eq!(result.raw.total, 96);
}

#[test]
fn percentages_use_answered_items_only() {
    let record = (1..=5).fold(AnswerRecord::new(), |r, i| r.with(format!("p{i}"), 2));
    let result = womac::score(&record);
    assert_eq!(result.normalized.pain, 50);
    assert_eq!(result.normalized.stiffness, 0);
    assert_eq!(result.normalized.function, 0);
    assert_eq!(result.normalized.total, 50);
    assert_eq!(result.raw.pain, 10);
    assert_eq!(result.answered, 5);
}

#[test]
fn severity_bands() {
    assert_eq!(severity_label(24).label, "Leve");
    assert_eq!(severity_label(25).label, "Moderado");
    assert_eq!(severity_label(50).label, "Moderado");
    assert_eq!(severity_label(51).label, "Severo");
}

#[test]
fn summary_carries_severity() {
    let ScoreSummary::Womac(summary) = Womac.score(&all_at(3)) else {
        panic!("expected a WOMAC summary");
    };
    assert_eq!(summary.womac_score.normalized.total, 75);
    assert_eq!(summary.severity.label, "Severo");
}

#[test]
fn detail_lines_are_grouped_by_subscale() {
    let lines = Womac.question_answers(&AnswerRecord::new().with("s1", 1));
    assert_eq!(lines.len(), 24);
    let s1 = lines.iter().find(|l| l.id == "s1").expect("s1 line");
    assert_eq!(s1.answer, "Poco");
    assert_eq!(s1.section.as_deref(), Some("Rigidez"));
    let p1 = lines.iter().find(|l| l.id == "p1").expect("p1 line");
    assert_eq!(p1.answer, "Sin respuesta");
}
