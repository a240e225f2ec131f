use std::path::Path;

use kneeform_cli::config::{self, KneeformConfig, OutputFormat};
use kneeform_cli::render;
use kneeform_cli::report::{self, Validation};
use kneeform_core::models::form::FormKind;
use kneeform_instruments::{all_instruments, get_instrument};
use serde::Serialize;

use crate::cli::{Commands, ConfigAction};

pub fn run(command: Commands, config: &KneeformConfig, config_path: &Path) -> eyre::Result<()> {
    match command {
        Commands::Instruments => instruments(config),
        Commands::Instrument { form } => instrument(config, form),
        Commands::Score {
            file,
            forms,
            patient,
            detail,
        } => score(config, &file, forms, patient.as_deref(), detail),
        Commands::History {
            file,
            form,
            patient,
        } => history(config, &file, form, &patient),
        Commands::Config { action } => match action {
            ConfigAction::Show => show_config(config, config_path),
            ConfigAction::Init { force } => init_config(config_path, force),
        },
    }
}

fn validation(config: &KneeformConfig) -> Validation {
    if config.strict {
        Validation::Strict
    } else {
        Validation::Warn
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentInfo<'a> {
    id: &'a str,
    name: &'a str,
    questions: usize,
    scorable: usize,
}

fn instruments(config: &KneeformConfig) -> eyre::Result<()> {
    let instruments = all_instruments();
    match config.output {
        OutputFormat::Json => {
            let info: Vec<_> = instruments
                .iter()
                .map(|i| InstrumentInfo {
                    id: i.id(),
                    name: i.name(),
                    questions: i.questions().len(),
                    scorable: i.scorable_count(),
                })
                .collect();
            print_json(&info)
        }
        OutputFormat::Text => {
            print!("{}", render::instrument_list(&instruments));
            Ok(())
        }
    }
}

fn instrument(config: &KneeformConfig, form: FormKind) -> eyre::Result<()> {
    let instrument = get_instrument(form);
    match config.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "id": instrument.id(),
            "name": instrument.name(),
            "sections": instrument.sections(),
            "questions": instrument.questions(),
        })),
        OutputFormat::Text => {
            print!("{}", render::instrument_definition(instrument.as_ref()));
            Ok(())
        }
    }
}

fn score(
    config: &KneeformConfig,
    file: &Path,
    forms: Vec<FormKind>,
    patient: Option<&str>,
    detail: bool,
) -> eyre::Result<()> {
    let records = report::load_records(file)?;
    let selected = report::select(&records, patient)?;
    let forms = if forms.is_empty() {
        config.forms.clone()
    } else {
        forms
    };

    let reports = selected
        .into_iter()
        .map(|record| report::patient_report(record, &forms, false, validation(config)))
        .collect::<eyre::Result<Vec<_>>>()?;

    match config.output {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", render::patient(report, detail));
            }
            Ok(())
        }
    }
}

fn history(
    config: &KneeformConfig,
    file: &Path,
    form: FormKind,
    patient: &str,
) -> eyre::Result<()> {
    let records = report::load_records(file)?;
    let selected = report::select(&records, Some(patient))?;
    if selected.len() > 1 {
        tracing::warn!(patient, matches = selected.len(), "several patients match, using the first");
    }
    let record = selected
        .first()
        .ok_or_else(|| eyre::eyre!("no patient matches {patient}"))?;

    let report = report::patient_report(record, &[form], true, validation(config))?;
    if report.forms.is_empty() {
        return Err(eyre::eyre!("patient {} has no {form} entries", record.id));
    }

    match config.output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", render::patient(&report, true));
            Ok(())
        }
    }
}

fn show_config(config: &KneeformConfig, config_path: &Path) -> eyre::Result<()> {
    tracing::info!(path = %config_path.display(), exists = config_path.exists(), "config");
    print_json(config)
}

fn init_config(config_path: &Path, force: bool) -> eyre::Result<()> {
    if config_path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    config::save_config(config_path, &KneeformConfig::default())?;
    println!("{}", config_path.display());
    Ok(())
}
