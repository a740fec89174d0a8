//! nsys-timeline: dump the sampled call-chain timeline of an Nsight Systems
//! SQLite export to CSV.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use nsys_timeline::{run, Config, DEFAULT_PREVIEW_ROWS};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Reads an Nvidia Nsight Systems SQLite export, joins its composite events with
their sampled call-chains, and writes the timeline (timestamp, module, symbol,
stack depth) to a CSV file. The first rows are printed once the file is written.

Usage: nsys-timeline <path_to_the_SQLite_file> <path_to_and_name_of_output_file>
";

#[derive(Debug, Parser)]
#[command(name = "nsys-timeline")]
#[command(about = "Export the sampled call-chain timeline of an Nsight Systems report to CSV")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of rows to print after writing the CSV
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// Nsight Systems SQLite export
    source: PathBuf,

    /// CSV file to create or overwrite
    output: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            verbosity: cli.verbose,
            source: cli.source,
            output: cli.output,
            preview_rows: cli.preview_rows,
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            // Wrong usage is informational, not a failure.
            print!("{USAGE}");
            return Ok(());
        }
    };

    let config = Config::from(cli);
    init_logging(config.verbosity);

    let table = run(&config).with_context(|| {
        format!(
            "failed to export timeline from {} to {}",
            config.source.display(),
            config.output.display()
        )
    })?;

    let mut stdout = io::stdout().lock();
    let printed = write!(stdout, "{}", table.preview(config.preview_rows))
        .and_then(|()| stdout.flush());
    match printed {
        // The reader went away (e.g. piped into `head`); the CSV is already written.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res.context("failed to print preview"),
    }
}
