use kneeform_cli::render::{INSUFFICIENT, instrument_definition, instrument_list, summary_line};
use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use kneeform_instruments::instruments::{ikdc::Ikdc, iks::Iks, koos::Koos};
use kneeform_instruments::{Instrument, all_instruments, get_instrument};

#[test]
fn invalid_ikdc_is_labelled() {
    let line = summary_line(&Ikdc.score(&AnswerRecord::new().with("q6_locking", 1)));
    assert_eq!(line, "IKDC Puntaje inválido (1 respondidas)");
}

#[test]
fn koos_marks_insufficient_subscales() {
    let answers = (1..=4).fold(AnswerRecord::new(), |r, i| r.with(format!("Q{i}"), 0));
    let line = summary_line(&Koos.score(&answers));
    assert!(line.contains("Calidad de vida 100"));
    assert!(line.contains(&format!("Síntomas {INSUFFICIENT}")));
}

#[test]
fn iks_shows_both_scores() {
    let answers = AnswerRecord::new().with("painPts", 50).with("walkPts", 40);
    assert_eq!(
        summary_line(&Iks.score(&answers)),
        "IKS Rodilla 50/100, Función 40/100 (2 de 10 campos)"
    );
}

#[test]
fn catalog_has_a_line_per_instrument() {
    let text = instrument_list(&all_instruments());
    assert_eq!(text.lines().count(), 5);
    assert!(text.contains("lysholm-tegner"));
}

#[test]
fn definition_lists_options_and_sections() {
    let text = instrument_definition(get_instrument(FormKind::Womac).as_ref());
    assert!(text.starts_with("WOMAC (womac)"));
    assert!(text.contains("[Dolor]"));
    assert!(text.contains("[Capacidad funcional]"));
    assert!(text.contains("Muchísimo"));

    let text = instrument_definition(get_instrument(FormKind::LysholmTegner).as_ref());
    assert!(text.contains("tegner_level (no puntúa)"));
}
