use kneeform_core::models::answer::AnswerRecord;
use kneeform_instruments::Instrument;
use kneeform_instruments::instruments::ikdc::{self, Ikdc, MIN_ANSWERED};

fn scorable() -> Vec<&'static kneeform_instruments::scoring::Question> {
    ikdc::questions()
        .iter()
        .filter(|q| !q.excluded_from_score)
        .collect()
}

fn at_max(count: usize) -> AnswerRecord {
    scorable()
        .into_iter()
        .take(count)
        .fold(AnswerRecord::new(), |record, q| {
            record.with(q.id.clone(), q.max_value())
        })
}

#[test]
fn eighteen_items_are_scored() {
    assert_eq!(ikdc::questions().len(), 19);
    assert_eq!(Ikdc.scorable_count(), 18);
}

#[test]
fn all_items_at_max_score_100() {
    let result = ikdc::score(&at_max(18));
    assert!(result.valid);
    assert_eq!(result.score, Some(100));
    assert_eq!(result.answered, 18);
}

#[test]
fn all_items_at_min_score_0() {
    let record = scorable()
        .into_iter()
        .fold(AnswerRecord::new(), |r, q| r.with(q.id.clone(), 0));
    assert_eq!(ikdc::score(&record).score, Some(0));
}

#[test]
fn fewer_than_sixteen_answered_is_invalid() {
    let result = ikdc::score(&at_max(MIN_ANSWERED as usize - 1));
    assert!(!result.valid);
    assert_eq!(result.score, None);
    assert_eq!(result.answered, 15);
}

#[test]
fn sixteen_answered_is_enough() {
    let result = ikdc::score(&at_max(16));
    assert!(result.valid);
    assert_eq!(result.score, Some(100));
}

#[test]
fn pre_injury_function_is_not_counted() {
    let record = at_max(15).with("q10a_function_pre_injury", 10);
    let result = ikdc::score(&record);
    assert_eq!(result.answered, 15);
    assert!(!result.valid);
}

#[test]
fn scales_are_rescaled_to_item_weight() {
    // Every item at half of its own maximum.
    let mut record = scorable()
        .into_iter()
        .fold(AnswerRecord::new(), |r, q| r.with(q.id.clone(), q.max_value() / 2.0));
    // The yes/no locking item has no midpoint.
    record.insert("q6_locking", 1);
    let result = ikdc::score(&record);
    assert!(result.valid);
    // 17 items at 2/4 and one at 4/4: (34 + 4) / 72.
    assert_eq!(result.score, Some(53));
}

#[test]
fn malformed_answers_are_skipped_and_reported() {
    let record = at_max(18)
        .with("q2_pain_frequency", 11)
        .with("q4_stiffness_swelling", "mucho");
    let result = ikdc::score(&record);
    assert_eq!(result.answered, 16);
    assert!(result.valid);

    let issues = Ikdc.validate_answers(&record);
    let ids: Vec<_> = issues.iter().map(|i| i.question_id.as_str()).collect();
    assert_eq!(ids, ["q2_pain_frequency", "q4_stiffness_swelling"]);
    assert!(Ikdc.ensure_valid(&record).is_err());
    assert!(Ikdc.ensure_valid(&at_max(18)).is_ok());
}

#[test]
fn null_answers_are_unanswered_not_zero() {
    let record = at_max(16).with("q10b_function_current", serde_json::Value::Null);
    let result = ikdc::score(&record);
    assert_eq!(result.answered, 16);
    assert_eq!(result.score, Some(100));
}

#[test]
fn scoring_is_idempotent() {
    let record = at_max(17);
    assert_eq!(Ikdc.score(&record), Ikdc.score(&record));
}

#[test]
fn sliders_take_whole_numbers_only() {
    let record = at_max(16).with("q10b_function_current", 7.3);
    let result = ikdc::score(&record);
    assert_eq!(result.answered, 16);

    let issues = Ikdc.validate_answers(&record);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].question_id, "q10b_function_current");
    assert_eq!(issues[0].message, "q10b_function_current: 7.3 is not a multiple of 1");
}

#[test]
fn activity_questions_keep_their_own_labels() {
    let record = AnswerRecord::new()
        .with("q1_activity_without_pain", 0)
        .with("q5_activity_without_swelling", 4)
        .with("q8_highest_regular_activity", 4);
    let lines = Ikdc.question_answers(&record);
    let answer = |id: &str| {
        lines
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.answer.clone())
            .unwrap_or_default()
    };
    assert_eq!(
        answer("q1_activity_without_pain"),
        "No puedo realizar ninguna de las anteriores por dolor"
    );
    assert_eq!(
        answer("q5_activity_without_swelling"),
        "Actividades muy agotadoras (saltar/girar…)"
    );
    assert_eq!(answer("q8_highest_regular_activity"), "Actividades muy agotadoras");
}
