//! CSV serialization of a timeline.

use crate::error::{Result, TimelineError};
use crate::extract::{TimelineTable, COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `table` as CSV to `path`, replacing any existing file.
pub fn export(table: &TimelineTable, path: &Path) -> Result<()> {
    let io_err = |source: csv::Error| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| io_err(e.into()))?;
    write_csv(table, file).map_err(io_err)?;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Serialize `table` as CSV into `writer`.
///
/// The header is always written, even for an empty table.
pub fn write_csv<W: Write>(table: &TimelineTable, writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in table.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
