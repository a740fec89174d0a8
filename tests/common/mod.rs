//! Common test utilities for nsys-timeline integration tests.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Subset of the Nsight Systems export schema the timeline reads.
const NSYS_SCHEMA: &str = "
    CREATE TABLE StringIds (
        id INTEGER NOT NULL PRIMARY KEY,
        value TEXT
    );
    CREATE TABLE COMPOSITE_EVENTS (
        id INTEGER NOT NULL PRIMARY KEY,
        start INTEGER NOT NULL,
        cpu INTEGER,
        threadState INTEGER,
        globalTid INTEGER,
        cpuCycles INTEGER
    );
    CREATE TABLE SAMPLING_CALLCHAINS (
        id INTEGER NOT NULL,
        symbol INTEGER NOT NULL,
        module INTEGER NOT NULL,
        unresolved INTEGER,
        originalIP INTEGER,
        stackDepth INTEGER NOT NULL,
        PRIMARY KEY (id, stackDepth)
    );
";

/// A throwaway Nsight Systems-shaped SQLite file.
pub struct FixtureDb {
    pub dir: TempDir,
    pub path: PathBuf,
    conn: Connection,
}

#[allow(dead_code)]
impl FixtureDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("report.sqlite");
        let conn = Connection::open(&path).expect("Failed to create fixture database");
        conn.execute_batch(NSYS_SCHEMA)
            .expect("Failed to create fixture schema");
        Self { dir, path, conn }
    }

    pub fn string(&self, id: i64, value: &str) -> &Self {
        self.conn
            .execute("INSERT INTO StringIds (id, value) VALUES (?1, ?2)", params![id, value])
            .expect("Failed to insert string");
        self
    }

    pub fn event(&self, id: i64, start: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO COMPOSITE_EVENTS (id, start, cpu, globalTid) VALUES (?1, ?2, 0, 0)",
                params![id, start],
            )
            .expect("Failed to insert composite event");
        self
    }

    pub fn frame(&self, id: i64, symbol: i64, module: i64, depth: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO SAMPLING_CALLCHAINS (id, symbol, module, stackDepth)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, symbol, module, depth],
            )
            .expect("Failed to insert call-chain frame");
        self
    }

    /// Run arbitrary SQL against the fixture, for rows the helpers can't express.
    pub fn sql(&self, sql: &str) -> &Self {
        self.conn.execute_batch(sql).expect("Failed to run fixture SQL");
        self
    }

    /// Path for an output file inside the fixture's temp dir.
    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Fixture with one event whose single frame is `main` in `libc`.
#[allow(dead_code)]
pub fn minimal_fixture() -> FixtureDb {
    let db = FixtureDb::new();
    db.string(1, "main")
        .string(2, "libc")
        .event(42, 1_000_000)
        .frame(42, 1, 2, 0);
    db
}

#[allow(dead_code)]
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[allow(dead_code)]
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}
