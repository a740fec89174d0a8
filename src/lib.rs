//! Extract the sampled call-chain timeline from an Nvidia Nsight Systems
//! SQLite export and write it as CSV.
//!
//! # Modules
//!
//! - [`extract`] - read and join the sample tables into a [`TimelineTable`]
//! - [`export`] - CSV serialization
//! - [`preview`] - terminal rendering of the first rows
//! - [`strings`] - `StringIds` symbol and module lookups
//!
//! # Example
//!
//! ```no_run
//! use nsys_timeline::{export, extract};
//! use std::path::Path;
//!
//! let table = extract(Path::new("report.sqlite")).expect("extraction failed");
//! export(&table, Path::new("timeline.csv")).expect("export failed");
//! print!("{}", table.preview(5));
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod preview;
pub mod strings;

pub use error::TimelineError;
pub use export::{export, write_csv};
pub use extract::{extract, TimelineRow, TimelineTable, COLUMNS};
pub use preview::Preview;
pub use strings::StringIds;

use std::path::PathBuf;

/// Number of rows previewed when nothing else is requested.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Options for one extraction run, separated from CLI parsing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verbosity level (0 = warn, 1 = info, 2 = debug, 3+ = trace)
    pub verbosity: u8,
    /// Nsight Systems SQLite export to read
    pub source: PathBuf,
    /// CSV file to create or overwrite
    pub output: PathBuf,
    /// Rows printed to stdout after export
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbosity: 0,
            source: PathBuf::new(),
            output: PathBuf::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Extract the timeline and export it to CSV, returning it for previewing.
///
/// The output file is only touched once extraction has succeeded.
pub fn run(config: &Config) -> error::Result<TimelineTable> {
    let table = extract(&config.source)?;
    export(&table, &config.output)?;
    Ok(table)
}
