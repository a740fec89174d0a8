//! Terminal preview of the first rows of a timeline.

use crate::extract::TimelineTable;
use std::fmt;

const MAX_COLUMN_WIDTH: usize = 50;

/// Borrowed view of the first rows of a [`TimelineTable`].
///
/// Nothing is formatted until the preview is displayed.
pub struct Preview<'a> {
    table: &'a TimelineTable,
    limit: usize,
}

impl<'a> Preview<'a> {
    pub fn new(table: &'a TimelineTable, limit: usize) -> Self {
        Self { table, limit }
    }

    /// Number of rows that will be rendered.
    pub fn shown(&self) -> usize {
        self.limit.min(self.table.len())
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.table.rows()[..self.shown()]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                vec![
                    i.to_string(),
                    row.timestamp.to_string(),
                    row.module_string.clone(),
                    row.event_string.clone(),
                    row.stack_depth.to_string(),
                ]
            })
            .collect()
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width && width > 3 {
        let kept: String = value.chars().take(width - 3).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown() == 0 {
            return writeln!(f, "(no rows)");
        }

        let mut headers = vec![""];
        headers.extend_from_slice(self.table.columns());
        let rows = self.cells();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, val) in row.iter().enumerate() {
                widths[i] = widths[i].max(val.chars().count());
            }
        }
        for w in &mut widths {
            *w = (*w).min(MAX_COLUMN_WIDTH);
        }

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, &width)| format!("{h:width$}"))
            .collect();
        writeln!(f, "{}", header_line.join(" | ").trim_end())?;

        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", sep.join("-+-"))?;

        for row in &rows {
            let row_line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(v, &width)| format!("{:width$}", truncate(v, width)))
                .collect();
            writeln!(f, "{}", row_line.join(" | ").trim_end())?;
        }

        if self.shown() < self.table.len() {
            writeln!(
                f,
                "[{} rows x {} columns]",
                self.table.len(),
                self.table.columns().len()
            )?;
        }
        Ok(())
    }
}
