use clap::Parser;
use eyre::Result;
use kneeform_cli::config::{self, LogFormat};

mod cli;
mod commands;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_path()?,
    };
    let mut config = config::load_config(&config_path)?;
    cli.apply(&mut config);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    commands::run(cli.command, &config, &config_path)
}
