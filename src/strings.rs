//! Interned string table lookups.
//!
//! Nsight Systems stores every symbol and module name once in `StringIds` and
//! refers to it by id. Call-chain rows carry two such ids, `symbol` and
//! `module`, which are resolved here through separate named lookups so the
//! meaning of each column is explicit at the call site.

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::collections::HashMap;

const REFERENCED_STRINGS_SQL: &str = "
    SELECT id, value
    FROM StringIds
    WHERE id IN (
        SELECT symbol FROM SAMPLING_CALLCHAINS
        UNION
        SELECT module FROM SAMPLING_CALLCHAINS
    )
";

/// In-memory copy of the `StringIds` table.
#[derive(Debug, Default, Clone)]
pub struct StringIds {
    values: HashMap<i64, String>,
}

impl StringIds {
    /// Load the `StringIds` entries referenced by `SAMPLING_CALLCHAINS`.
    ///
    /// Text that is not valid UTF-8 is decoded lossily and NULL values are
    /// left out, so they resolve to nothing.
    pub fn load(conn: &Connection) -> rusqlite::Result<Self> {
        let mut stmt = conn.prepare(REFERENCED_STRINGS_SQL)?;
        let mut rows = stmt.query([])?;

        let mut values = HashMap::new();
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let value = match row.get_ref(1)? {
                ValueRef::Null => continue,
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    String::from_utf8_lossy(bytes).into_owned()
                }
                ValueRef::Integer(n) => n.to_string(),
                ValueRef::Real(n) => n.to_string(),
            };
            values.insert(id, value);
        }
        Ok(Self { values })
    }

    /// Name of the function a call-chain frame sampled.
    pub fn resolve_symbol(&self, id: i64) -> Option<&str> {
        self.get(id)
    }

    /// Name of the binary or shared object a call-chain frame belongs to.
    pub fn resolve_module(&self, id: i64) -> Option<&str> {
        self.get(id)
    }

    fn get(&self, id: i64) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(i64, String)> for StringIds {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
