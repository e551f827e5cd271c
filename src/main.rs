use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};

use candidate_scoring::cli::{Cli, Commands};
use candidate_scoring::commands::{self, CalibrateConfig, PersonasConfig, VerifyConfig};
use candidate_scoring::config::{self, ScoringConfig};
use candidate_scoring::observability::init_tracing;

fn load_settings(cli: &Cli) -> Result<ScoringConfig> {
    match &cli.config {
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let settings = load_settings(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Verify {
            transcript,
            metadata,
            graduation_year,
            as_of,
            format,
        } => commands::verify_transcript(
            VerifyConfig {
                transcript,
                metadata,
                graduation_year,
                as_of,
                format,
            },
            &mut out,
        )?,
        Commands::Calibrate {
            score,
            vertical,
            role,
            format,
        } => commands::calibrate_score(
            CalibrateConfig {
                score,
                vertical,
                role,
                format,
            },
            &settings,
            &mut out,
        )?,
        Commands::Personas {
            score,
            vertical,
            format,
        } => commands::simulate_personas(
            PersonasConfig {
                score,
                vertical,
                format,
            },
            &settings,
            &mut out,
        )?,
        Commands::Verticals { format } => commands::list_verticals(format, &mut out)?,
        Commands::Init { force } => {
            let path = commands::init_config(&std::env::current_dir()?, force)?;
            writeln!(out, "Created {}", path.display())?;
        }
    }

    out.flush()?;
    Ok(())
}
