//! avrogen command line.
//!
//! Reads an Avro schema file and writes the generated Rust module to a file
//! or to stdout. Logs go to stderr; verbosity follows `RUST_LOG`.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use avrogen::{GenConfig, generate_from_file};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generate serde-ready Rust structs from an Avro schema
#[derive(Parser, Debug)]
#[command(name = "avrogen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Avro schema file (.avsc)
    schema: PathBuf,

    /// Name of the generated module
    #[arg(short, long, default_value = avrogen::codegen::config::DEFAULT_MODULE_NAME)]
    module: String,

    /// Generate binary marshal/unmarshal helpers for the root record
    #[arg(long)]
    encoders: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = GenConfig::new(cli.module).encoders(cli.encoders);
    let code = generate_from_file(&cli.schema, &config)
        .with_context(|| format!("failed to generate code from {}", cli.schema.display()))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), "generated code written");
        }
        None => {
            io::stdout()
                .lock()
                .write_all(code.as_bytes())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}
