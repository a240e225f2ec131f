use kneeform_core::models::answer::AnswerRecord;
use kneeform_instruments::Instrument;
use kneeform_instruments::instruments::lysholm::{
    self, LysholmTegner, TEGNER_ID, interpret_lysholm,
};
use kneeform_instruments::scoring::ScoreSummary;

fn all_max() -> AnswerRecord {
    lysholm::questions()
        .iter()
        .filter(|q| !q.excluded_from_score)
        .fold(AnswerRecord::new(), |r, q| r.with(q.id.clone(), q.max_value()))
}

#[test]
fn domain_weights_sum_to_100() {
    let result = lysholm::score(&all_max());
    assert_eq!(result.score, 100);
    assert_eq!(result.answered_count, 8);
    assert_eq!(result.interpretation().label, "Excelente");
}

#[test]
fn partial_answers_are_not_rescaled() {
    let record = AnswerRecord::new().with("limp", 5).with("pain", 25);
    let result = lysholm::score(&record);
    assert_eq!(result.score, 30);
    assert_eq!(result.answered_count, 2);
    assert_eq!(result.interpretation().label, "Malo");
}

#[test]
fn empty_record_is_reported_as_unanswered() {
    let result = lysholm::score(&AnswerRecord::new());
    assert_eq!(result.score, 0);
    assert_eq!(result.interpretation().label, "Sin respuestas");
}

#[test]
fn band_edges() {
    assert_eq!(interpret_lysholm(95).label, "Excelente");
    assert_eq!(interpret_lysholm(94).label, "Bueno");
    assert_eq!(interpret_lysholm(84).label, "Bueno");
    assert_eq!(interpret_lysholm(83).label, "Regular");
    assert_eq!(interpret_lysholm(65).label, "Regular");
    assert_eq!(interpret_lysholm(64).label, "Malo");
    assert_eq!(interpret_lysholm(0).color, "#ef4444");
}

#[test]
fn tegner_is_looked_up_but_not_scored() {
    let record = all_max().with(TEGNER_ID, 7);
    let ScoreSummary::Lysholm(summary) = LysholmTegner.score(&record) else {
        panic!("expected a Lysholm summary");
    };
    assert_eq!(summary.lysholm_score.score, 100);
    assert_eq!(summary.tegner_value, Some(7));
    assert!(summary.tegner_label.is_some_and(|l| l.contains("tenis")));
}

#[test]
fn unknown_tegner_level_has_no_label() {
    let tegner = lysholm::tegner(&AnswerRecord::new().with(TEGNER_ID, 12));
    assert_eq!(tegner.value, None);
    assert_eq!(tegner.label, None);
}

#[test]
fn off_table_points_are_ignored() {
    let record = AnswerRecord::new().with("locking", 7).with("swelling", 10);
    let result = lysholm::score(&record);
    assert_eq!(result.score, 10);
    assert_eq!(result.answered_count, 1);
}
