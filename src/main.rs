use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use picture_recognition::{Collaborators, Interpreter, PipelineConfig};

/// Trains an image classifier and recognizes images, driven by a command script.
///
/// Script commands, one per line:
///   CreateTraining: width:16, height:16, type:RGB
///   Input: image:./coins/dime.png, identity:dime
///   Network: hidden1:100, hidden2:0
///   Train: mode:console, minutes:1, strategyerror:0.25, strategycycles:50
///   Whatis: image:./coins/testcoin.png
#[derive(Debug, Parser)]
#[command(author, version, about, verbatim_doc_comment)]
struct Args {
    /// Command script to execute
    #[arg(default_value = "command.txt")]
    script: PathBuf,

    /// JSON file with pipeline settings (learning rate, reserved tokens, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => PipelineConfig::load_json(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let collaborators = Collaborators::from_config(&config);
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock(), config, collaborators);
    interpreter
        .run_file(&args.script)
        .with_context(|| format!("script {} aborted", args.script.display()))?;
    Ok(())
}
