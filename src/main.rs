//! sqlerd CLI
//!
//! Reads a SQL script and prints the inferred schema.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sqlerd::report::Summary;
use sqlerd::{InferenceConfig, InferenceOptions, parse_with};

/// Infer tables and relationships from SQL DDL.
#[derive(Parser)]
#[command(name = "sqlerd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL file to read, or `-` for stdin.
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Many-to-many records: `single` or `directional`.
    #[arg(long, env = "SQLERD_MANY_TO_MANY", default_value = "single")]
    many_to_many: String,

    /// Extra suffix appended to `<stem>_id` stems when matching tables (repeatable).
    #[arg(long = "suffix", value_name = "SUFFIX")]
    suffixes: Vec<String>,

    /// Extra `from:to` suffix replacement, e.g. `y:ies` (repeatable).
    #[arg(long = "replace-suffix", value_name = "FROM:TO")]
    replacements: Vec<String>,

    /// Only report declared foreign keys and junction tables.
    #[arg(long)]
    no_conventions: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Summary,
}

impl Cli {
    fn config(&self) -> anyhow::Result<InferenceConfig> {
        let options = InferenceOptions {
            many_to_many: Some(self.many_to_many.clone()),
            suffixes: self.suffixes.clone(),
            replace_suffixes: self.replacements.clone(),
            conventions: Some(!self.no_conventions),
        };
        Ok(options.into_config()?)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if self.input.as_os_str() == "-" {
            let mut sql = String::new();
            io::stdin()
                .read_to_string(&mut sql)
                .context("Failed to read stdin")?;
            return Ok(sql);
        }
        fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config()?;
    let sql = cli.read_input()?;
    let outcome = parse_with(&sql, &config);

    let rendered = match cli.format {
        Format::Json => serde_json::to_string_pretty(&outcome)? + "\n",
        Format::Summary => Summary::new(&outcome).to_string(),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
