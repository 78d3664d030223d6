//! CLI argument parsing for Call Repeat

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "call-repeat")]
#[command(version)]
#[command(
    about = "Classify repeated inbound calls into same-group and cross-group pairs",
    long_about = None
)]
pub struct Cli {
    /// Call-center export to classify (.xlsx, .xls, .ods or .csv)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Directory receiving the two result workbooks
    #[arg(short, long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// TOML file overriding the excluded group, window, header row or sheet
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Summary format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long)]
    pub debug: bool,
}
