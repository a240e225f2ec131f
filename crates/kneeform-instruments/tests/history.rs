use kneeform_core::models::entry::FormEntry;
use kneeform_core::models::form::FormKind;
use kneeform_instruments::history::{score_current, score_history};
use kneeform_instruments::{Instrument, all_instruments, find_instrument, get_instrument};
use serde_json::json;

fn entry() -> FormEntry {
    let raw = json!({
        "id": "current-1",
        "date": { "_seconds": 1_700_000_000, "_nanoseconds": 0 },
        "limp": 5,
        "pain": 20,
        "historical": [
            { "id": "old-1", "type": "lysholm-tegner", "data": { "limp": 5, "pain": 20 } },
            { "type": "womac", "data": { "p1": 4 } },
            { "type": "LYSHOLM-TEGNER", "data": { "limp": 0 } }
        ]
    });
    FormEntry::from_value(&raw).expect("entry object")
}

#[test]
fn history_keeps_only_the_instruments_form() {
    let instrument = get_instrument(FormKind::LysholmTegner);
    let scored = score_history(instrument.as_ref(), &entry());
    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].id, "old-1");
    assert_eq!(scored[1].id, "historical-1");
}

#[test]
fn rescoring_history_matches_current_scoring() {
    let instrument = get_instrument(FormKind::LysholmTegner);
    let entry = entry();
    let current = score_current(instrument.as_ref(), &entry);
    let history = score_history(instrument.as_ref(), &entry);

    assert_eq!(current.id, "current-1");
    assert_eq!(current.summary, history[0].summary);
    assert_eq!(current.answers, history[0].answers);
    assert!(current.submitted_at.is_some());
}

#[test]
fn scoring_twice_gives_identical_results() {
    let entry = entry();
    for instrument in all_instruments() {
        let first = score_current(instrument.as_ref(), &entry);
        let second = score_current(instrument.as_ref(), &entry);
        assert_eq!(first, second, "{}", instrument.name());
    }
}

#[test]
fn registry_covers_every_form() {
    let instruments = all_instruments();
    assert_eq!(instruments.len(), FormKind::ALL.len());
    for (instrument, kind) in instruments.iter().zip(FormKind::ALL) {
        assert_eq!(instrument.kind(), kind);
        assert_eq!(get_instrument(kind).id(), kind.storage_key());
    }
}

#[test]
fn instruments_are_found_by_name_or_key() {
    assert_eq!(find_instrument("womac").map(|i| i.kind()).ok(), Some(FormKind::Womac));
    assert_eq!(
        find_instrument("LYSHOLM-TEGNER").map(|i| i.kind()).ok(),
        Some(FormKind::LysholmTegner)
    );
    assert!(find_instrument("sf-36").is_err());
}
