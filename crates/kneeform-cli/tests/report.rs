use kneeform_cli::render;
use kneeform_cli::report::{Validation, load_records, patient_report, select};
use kneeform_core::models::form::FormKind;
use kneeform_instruments::scoring::ScoreSummary;
use serde_json::json;

fn export() -> serde_json::Value {
    json!({
        "ok": true,
        "records": [
            {
                "general": { "id": "p-1", "name": "Ana Pérez", "email": "ana@example.com" },
                "lysholm-tegner": [
                    {
                        "id": "e-1",
                        "date": { "_seconds": 1_700_000_000, "_nanoseconds": 0 },
                        "limp": 5,
                        "support": 5,
                        "locking": 15,
                        "instability": 25,
                        "pain": 25,
                        "swelling": 10,
                        "stairs": 10,
                        "squatting": 5,
                        "tegner_level": 6,
                        "historical": [
                            { "id": "h-1", "type": "lysholm-tegner", "data": { "limp": 3, "pain": 10 } },
                            { "type": "ikdc", "data": {} }
                        ]
                    }
                ],
                "womac": [ { "p1": 2, "p2": 9 } ]
            },
            { "general": { "email": "luis@example.com" } }
        ]
    })
}

fn write_export() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    std::fs::write(&path, export().to_string()).expect("write");
    (dir, path)
}

#[test]
fn loads_and_selects_patients() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");
    assert_eq!(records.len(), 2);

    assert_eq!(select(&records, None).expect("all").len(), 2);
    let found = select(&records, Some("LUIS@example.com")).expect("by email");
    assert_eq!(found[0].id, "luis@example.com");
    assert!(select(&records, Some("nobody")).is_err());
}

#[test]
fn report_scores_current_and_history() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");

    let report = patient_report(&records[0], &[FormKind::LysholmTegner], true, Validation::Warn)
        .expect("report");
    assert_eq!(report.display_name, "Ana Pérez");
    assert_eq!(report.forms.len(), 1);

    let form = &report.forms[0];
    let ScoreSummary::Lysholm(current) = &form.current.summary else {
        panic!("expected Lysholm");
    };
    assert_eq!(current.lysholm_score.score, 100);
    assert_eq!(current.tegner_value, Some(6));

    assert_eq!(form.history.len(), 1);
    let ScoreSummary::Lysholm(old) = &form.history[0].summary else {
        panic!("expected Lysholm");
    };
    assert_eq!(old.lysholm_score.score, 13);
    assert!(form.issues.is_empty());
}

#[test]
fn forms_without_entries_are_skipped() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");
    let report = patient_report(&records[1], &FormKind::ALL, false, Validation::Warn)
        .expect("report");
    assert!(report.forms.is_empty());
    assert!(render::patient(&report, false).contains("Sin formularios"));
}

#[test]
fn unusable_answers_warn_or_fail() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");

    let report = patient_report(&records[0], &[FormKind::Womac], false, Validation::Warn)
        .expect("report");
    let issues = &report.forms[0].issues;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].question_id, "p2");

    assert!(patient_report(&records[0], &[FormKind::Womac], false, Validation::Strict).is_err());
}

#[test]
fn text_report_lists_summaries() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");
    let report = patient_report(
        &records[0],
        &[FormKind::LysholmTegner, FormKind::Womac],
        true,
        Validation::Warn,
    )
    .expect("report");

    let text = render::patient(&report, false);
    assert!(text.contains("== Ana Pérez (p-1)"));
    assert!(text.contains("Lysholm 100/100 Excelente"));
    assert!(text.contains("Historial"));
    assert!(text.contains("WOMAC 50% Moderado"));
    assert!(text.contains("! p2: 9 is not one of the answer options"));
}

#[test]
fn report_serializes_camel_case() {
    let (_dir, path) = write_export();
    let records = load_records(&path).expect("load");
    let report = patient_report(&records[0], &[FormKind::Womac], false, Validation::Warn)
        .expect("report");
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["displayName"], "Ana Pérez");
    assert_eq!(json["forms"][0]["form"], "WOMAC");
    assert_eq!(json["forms"][0]["current"]["summary"]["type"], "WOMAC");
    assert_eq!(
        json["forms"][0]["current"]["summary"]["womacScore"]["normalized"]["pain"],
        50
    );
}
