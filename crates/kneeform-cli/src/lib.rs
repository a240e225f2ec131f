//! kneeform-cli
//!
//! Command-line front end for the knee questionnaire scoring engine: config
//! file handling, record loading and report rendering. The binary in
//! `main.rs` wires these to clap subcommands.

pub mod config;
pub mod render;
pub mod report;
