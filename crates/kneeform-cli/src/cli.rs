use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kneeform_cli::config::{KneeformConfig, LogFormat, OutputFormat};
use kneeform_core::models::form::FormKind;

#[derive(Parser)]
#[command(name = "kneeform")]
#[command(about = "Score knee questionnaires (IKDC, Lysholm-Tegner, WOMAC, IKS, KOOS)")]
#[command(version)]
pub struct Cli {
    /// Config file (default: <config dir>/kneeform/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log format, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Fail on the first unusable answer instead of warning
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available instruments
    Instruments,
    /// Show the questions of one instrument
    Instrument {
        /// Form name or storage key (e.g. IKDC, lysholm-tegner)
        form: FormKind,
    },
    /// Score the current entries of a records export
    Score {
        /// Records export (JSON envelope or array)
        file: PathBuf,
        /// Only these forms (repeatable; default from config)
        #[arg(long = "form")]
        forms: Vec<FormKind>,
        /// Patient id or email
        #[arg(long)]
        patient: Option<String>,
        /// Include every question's answer
        #[arg(long)]
        detail: bool,
    },
    /// Score one patient's form and all of its historical entries
    History {
        /// Records export (JSON envelope or array)
        file: PathBuf,
        /// Form name or storage key
        #[arg(long)]
        form: FormKind,
        /// Patient id or email
        #[arg(long)]
        patient: String,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut KneeformConfig) {
        if let Some(format) = self.format {
            config.output = format;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        if self.strict {
            config.strict = true;
        }
    }
}
