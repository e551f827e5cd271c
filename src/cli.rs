use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "candidate-scoring")]
#[command(about = "Interview scoring, calibration and transcript verification", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the nearest .candidate-scoring.toml)
    #[arg(long, global = true, env = "CANDIDATE_SCORING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the authenticity checks over a parsed transcript
    Verify {
        /// Parsed transcript JSON: either a bare transcript or
        /// {"parsed_transcript": ..., "pdf_metadata": ...}
        transcript: PathBuf,

        /// PDF metadata JSON, overriding any embedded in the transcript file
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Candidate's graduation year
        #[arg(long = "graduation-year")]
        graduation_year: Option<i32>,

        /// Reference date for the freshness check (defaults to today)
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Calibrate a raw 0-10 score against its cohort
    Calibrate {
        #[arg(long)]
        score: f64,

        #[arg(long)]
        vertical: Option<String>,

        /// Role level (junior, mid, senior, ...)
        #[arg(long)]
        role: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Re-weight a score through every interviewer persona
    Personas {
        /// A stored score result or a raw oracle scoring payload
        score: PathBuf,

        #[arg(long)]
        vertical: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the canonical verticals and their dimension weights
    Verticals {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default .candidate-scoring.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
