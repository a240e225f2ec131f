//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use kneeform_instruments::Instrument;
use kneeform_instruments::history::ScoredEntry;
use kneeform_instruments::instruments::koos::KoosSubscale;
use kneeform_instruments::scoring::{InputKind, ScoreSummary};

use crate::report::{FormReport, PatientReport};

/// Shown in place of a score that could not be computed.
pub const INSUFFICIENT: &str = "Datos insuficientes";

/// One-line summary of a scored submission.
pub fn summary_line(summary: &ScoreSummary) -> String {
    match summary {
        ScoreSummary::Ikdc(ikdc) => match ikdc.score {
            Some(score) if ikdc.valid => {
                format!("IKDC {score}/100 ({} respondidas)", ikdc.answered)
            }
            _ => format!("IKDC Puntaje inválido ({} respondidas)", ikdc.answered),
        },
        ScoreSummary::Lysholm(lysholm) => {
            let mut line = format!(
                "Lysholm {}/100 {} ({} respondidas)",
                lysholm.lysholm_score.score,
                lysholm.interpretation.label,
                lysholm.lysholm_score.answered_count
            );
            match (lysholm.tegner_value, &lysholm.tegner_label) {
                (Some(level), Some(label)) => {
                    let _ = write!(line, "; Tegner {level}: {label}");
                }
                _ => line.push_str("; Tegner sin respuesta"),
            }
            line
        }
        ScoreSummary::Womac(womac) => {
            let score = &womac.womac_score;
            format!(
                "WOMAC {}% {} (Dolor {}%, Rigidez {}%, Función {}%; {}/{} respondidas)",
                score.normalized.total,
                womac.severity.label,
                score.normalized.pain,
                score.normalized.stiffness,
                score.normalized.function,
                score.answered,
                score.max_answered
            )
        }
        ScoreSummary::Iks(iks) => format!(
            "IKS Rodilla {}/100, Función {}/100 ({} de 10 campos)",
            iks.knee_score, iks.function_score, iks.answered
        ),
        ScoreSummary::Koos(koos) => {
            let part = |name: &str, subscale: &KoosSubscale| match subscale.score {
                Some(score) if subscale.valid => format!("{name} {score}"),
                _ => format!("{name} {INSUFFICIENT}"),
            };
            format!(
                "KOOS {}, {}, {}, {}, {}",
                part("Síntomas", &koos.symptoms),
                part("Dolor", &koos.pain),
                part("AVD", &koos.adl),
                part("Deporte", &koos.sport),
                part("Calidad de vida", &koos.qol)
            )
        }
    }
}

fn entry_header(entry: &ScoredEntry) -> String {
    match entry.submitted_at {
        Some(at) => format!("{} ({})", entry.id, at.strftime("%Y-%m-%d %H:%M")),
        None => entry.id.clone(),
    }
}

/// A submission with its answers, grouped under section headings.
pub fn entry_detail(out: &mut String, entry: &ScoredEntry) {
    let _ = writeln!(out, "  {}", entry_header(entry));
    let _ = writeln!(out, "    {}", summary_line(&entry.summary));

    let mut section: Option<&str> = None;
    for line in &entry.answers {
        if line.section.as_deref() != section {
            section = line.section.as_deref();
            if let Some(title) = section {
                let _ = writeln!(out, "    [{title}]");
            }
        }
        let _ = writeln!(out, "      {}: {}", line.text, line.answer);
    }
}

fn form(out: &mut String, report: &FormReport, detail: bool) {
    let _ = writeln!(out, "{}", report.name);
    if detail {
        entry_detail(out, &report.current);
    } else {
        let _ = writeln!(
            out,
            "  {}: {}",
            entry_header(&report.current),
            summary_line(&report.current.summary)
        );
    }

    if !report.history.is_empty() {
        let _ = writeln!(out, "  Historial");
        for entry in &report.history {
            let _ = writeln!(
                out,
                "    {}: {}",
                entry_header(entry),
                summary_line(&entry.summary)
            );
        }
    }

    for issue in &report.issues {
        let _ = writeln!(out, "  ! {issue}");
    }
}

/// A patient's forms. `detail` adds the per-question lines.
pub fn patient(report: &PatientReport, detail: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({})", report.display_name, report.id);
    if report.forms.is_empty() {
        let _ = writeln!(out, "Sin formularios");
    }
    for report in &report.forms {
        form(&mut out, report, detail);
    }
    out
}

/// Catalog line per instrument.
pub fn instrument_list(instruments: &[Box<dyn Instrument>]) -> String {
    let mut out = String::new();
    for instrument in instruments {
        let _ = writeln!(
            out,
            "{:<16} {:<16} {:>3} preguntas, {:>3} puntuables",
            instrument.id(),
            instrument.name(),
            instrument.questions().len(),
            instrument.scorable_count()
        );
    }
    out
}

/// Every question of an instrument with its answer options.
pub fn instrument_definition(instrument: &dyn Instrument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", instrument.name(), instrument.id());

    let mut section: Option<&str> = None;
    for question in instrument.questions() {
        if question.section.as_deref() != section {
            section = question.section.as_deref();
            if let Some(title) = instrument.section_title(section) {
                let _ = writeln!(out, "\n[{title}]");
            }
        }

        let excluded = if question.excluded_from_score {
            " (no puntúa)"
        } else {
            ""
        };
        let _ = writeln!(out, "{}{excluded}: {}", question.id, question.text);

        match &question.input {
            InputKind::Choice { options } => {
                for option in options {
                    let _ = writeln!(out, "    {:>4} {}", option.value, option.label);
                }
            }
            InputKind::Scale { range } => {
                let _ = writeln!(out, "    escala {} a {}", range.min, range.max);
            }
            InputKind::Degrees { range } => {
                let _ = writeln!(out, "    grados {} a {}", range.min, range.max);
            }
            InputKind::Flag => {
                let _ = writeln!(out, "    sí / no");
            }
        }
    }
    out
}
