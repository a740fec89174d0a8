//! Timeline extraction from an Nsight Systems SQLite export.
//!
//! The export keeps sampled call-chains in `SAMPLING_CALLCHAINS`, keyed by the
//! id of the `COMPOSITE_EVENTS` sample they belong to. Each call-chain frame
//! names its function and module by `StringIds` id. Extraction joins the two
//! sample tables in SQL and resolves both ids through [`StringIds`].

use crate::error::{classify, Result, TimelineError};
use crate::preview::Preview;
use crate::strings::StringIds;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Column names of the timeline, in output order.
pub const COLUMNS: [&str; 4] = ["timestamp", "module_string", "event_string", "stackDepth"];

const TIMELINE_SQL: &str = "
    SELECT
        e.start,
        c.stackDepth,
        c.symbol,
        c.module
    FROM
        COMPOSITE_EVENTS e
        JOIN SAMPLING_CALLCHAINS c ON e.id = c.id
    ORDER BY
        e.start, c.stackDepth
";

/// One sampled call-chain frame with its names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// Start time of the composite event, in nanoseconds.
    pub timestamp: i64,
    pub module_string: String,
    pub event_string: String,
    #[serde(rename = "stackDepth")]
    pub stack_depth: i64,
}

/// Timeline rows ordered by timestamp, then by stack depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineTable {
    rows: Vec<TimelineRow>,
}

impl TimelineTable {
    /// Build a table from rows in any order.
    ///
    /// The sort is stable, so rows with equal (timestamp, stack depth) keep
    /// their relative order.
    pub fn new(mut rows: Vec<TimelineRow>) -> Self {
        rows.sort_by_key(|row| (row.timestamp, row.stack_depth));
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lazily rendered view of the first `n` rows, for terminal display.
    pub fn preview(&self, n: usize) -> Preview<'_> {
        Preview::new(self, n)
    }
}

/// Extract the sampled call-chain timeline from the database at `path`.
///
/// The database is opened read-only and the connection is closed before this
/// returns, whether or not the query succeeded.
pub fn extract(path: &Path) -> Result<TimelineTable> {
    info!("Opening {}", path.display());
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| TimelineError::DataSource {
        path: path.to_path_buf(),
        source,
    })?;

    read_timeline(&conn).map_err(|err| classify(path, err))
}

/// Run the timeline join against an open connection.
pub fn read_timeline(conn: &Connection) -> rusqlite::Result<TimelineTable> {
    let strings = StringIds::load(conn)?;
    debug!("Loaded {} interned strings", strings.len());

    let mut stmt = conn.prepare(TIMELINE_SQL)?;
    let mut rows = stmt.query([])?;

    let mut timeline = Vec::new();
    let mut joined = 0usize;
    while let Some(row) = rows.next()? {
        joined += 1;
        let timestamp: i64 = row.get(0)?;
        let stack_depth: i64 = row.get(1)?;
        let symbol: i64 = row.get(2)?;
        let module: i64 = row.get(3)?;

        let (Some(event_string), Some(module_string)) =
            (strings.resolve_symbol(symbol), strings.resolve_module(module))
        else {
            continue;
        };

        timeline.push(TimelineRow {
            timestamp,
            module_string: module_string.to_string(),
            event_string: event_string.to_string(),
            stack_depth,
        });
    }

    let dropped = joined - timeline.len();
    if dropped > 0 {
        debug!("Dropped {dropped} call-chain frames with unresolved string ids");
    }
    info!("Extracted {} timeline rows", timeline.len());

    Ok(TimelineTable::new(timeline))
}
