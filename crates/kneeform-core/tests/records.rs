use kneeform_core::models::answer::AnswerRecord;
use kneeform_core::models::form::FormKind;
use kneeform_core::models::patient::parse_records;
use serde_json::json;

fn export() -> String {
    json!({
        "ok": true,
        "records": [
            {
                "general": {
                    "id": "p-1",
                    "email": "ana@example.com",
                    "name": "Ana Pérez",
                    "sex": "femenino",
                    "birthdate": "1980-02-01",
                    "hasSurgery": true
                },
                "ikdc": [
                    {
                        "id": "e-1",
                        "date": { "_seconds": 1_700_000_000, "_nanoseconds": 500_000_000 },
                        "q1_activity_without_pain": 3,
                        "q2_pain_frequency": null,
                        "historical": [
                            { "id": "h-1", "type": "IKDC", "data": { "q1_activity_without_pain": 2 } },
                            { "type": "womac", "data": { "p1": 1 } },
                            "garbage"
                        ]
                    }
                ],
                "womac": "not-an-array"
            },
            { "email": "solo@example.com" },
            {}
        ]
    })
    .to_string()
}

#[test]
fn envelope_is_normalized_into_rows() {
    let rows = parse_records(&export()).unwrap();
    assert_eq!(rows.len(), 3);

    let ana = &rows[0];
    assert_eq!(ana.id, "p-1");
    assert_eq!(ana.email.as_deref(), Some("ana@example.com"));
    assert_eq!(ana.display_name(), "Ana Pérez");
    assert!(ana.has_surgery);
    assert!(ana.has_form(FormKind::Ikdc));
    assert!(!ana.has_form(FormKind::Womac));
    assert!(!ana.has_form(FormKind::Koos));
}

#[test]
fn id_falls_back_to_email_then_index() {
    let rows = parse_records(&export()).unwrap();
    assert_eq!(rows[1].id, "solo@example.com");
    assert_eq!(rows[1].display_name(), "solo@example.com");
    assert_eq!(rows[2].id, "row-2");
    assert!(rows[1].matches("SOLO@example.com"));
}

#[test]
fn primary_entry_keeps_answers_and_decodes_date() {
    let rows = parse_records(&export()).unwrap();
    let entry = rows[0].primary_entry(FormKind::Ikdc).unwrap();

    assert_eq!(entry.id.as_deref(), Some("e-1"));
    assert_eq!(
        entry.submitted_at.unwrap().as_millisecond(),
        1_700_000_000_500
    );
    assert_eq!(entry.answers.number("q1_activity_without_pain"), Some(3.0));
    assert!(!entry.answers.is_answered("q2_pain_frequency"));
    assert!(!entry.answers.is_answered("historical"));
    assert!(!entry.answers.is_answered("date"));
}

#[test]
fn history_is_filtered_by_form_type() {
    let rows = parse_records(&export()).unwrap();
    let entry = rows[0].primary_entry(FormKind::Ikdc).unwrap();

    assert_eq!(entry.historical.len(), 2);
    let ikdc = entry.history(FormKind::Ikdc);
    assert_eq!(ikdc.len(), 1);
    assert_eq!(ikdc[0].id.as_deref(), Some("h-1"));
    assert_eq!(ikdc[0].answers.number("q1_activity_without_pain"), Some(2.0));
    assert_eq!(entry.history(FormKind::Womac).len(), 1);
    assert!(entry.history(FormKind::Iks).is_empty());
}

#[test]
fn rejected_envelope_is_an_error() {
    assert!(parse_records(r#"{ "ok": false, "records": [] }"#).is_err());
    assert!(parse_records("42").is_err());
    assert!(parse_records("not json").is_err());
    assert!(parse_records("[]").unwrap().is_empty());
}

#[test]
fn answer_accessors_are_defensive() {
    let record = AnswerRecord::new()
        .with("n", 2.5)
        .with("s", "3")
        .with("empty", "  ")
        .with("flag", true)
        .with("flag_num", 0)
        .with("null", serde_json::Value::Null);

    assert_eq!(record.number("n"), Some(2.5));
    assert_eq!(record.number("s"), None);
    assert!(!record.is_answered("empty"));
    assert!(!record.is_answered("null"));
    assert!(!record.is_answered("missing"));
    assert_eq!(record.flag("flag"), Some(true));
    assert_eq!(record.flag("flag_num"), Some(false));
    assert_eq!(record.flag("s"), None);
}

#[test]
fn form_kind_parses_display_names_and_storage_keys() {
    assert_eq!("IKDC".parse::<FormKind>().unwrap(), FormKind::Ikdc);
    assert_eq!("lysholm-tegner".parse::<FormKind>().unwrap(), FormKind::LysholmTegner);
    assert_eq!("Koos".parse::<FormKind>().unwrap(), FormKind::Koos);
    assert!("sf36".parse::<FormKind>().is_err());
    assert_eq!(FormKind::Womac.to_string(), "WOMAC");
}
