use anyhow::{Context, Result};
use call_repeat::cli::{Cli, OutputFormat};
use call_repeat::{process_workbook_with_config, ClassifierConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces TRACE, otherwise RUST_LOG (default warn)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => ClassifierConfig::from_toml(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ClassifierConfig::default(),
    };

    let summary = process_workbook_with_config(&args.input, &args.output_dir, &config)
        .with_context(|| format!("Failed to classify {}", args.input.display()))?;

    match args.format {
        OutputFormat::Text => print!("{}", summary.to_text()),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }

    Ok(())
}
