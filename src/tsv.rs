//! Tabular output: a fixed 4-column, tab-separated projection of the records.

use crate::error::{Result, TetlError};
use crate::fields::TARGET_USER_FIELD;
use crate::normalize::Record;
use crate::util::write_atomic;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

/// (source field, output column), in output order.
pub const TSV_COLUMNS: [(&str, &str); 4] = [
    (TARGET_USER_FIELD, "author_user_name"),
    ("text", "tweet"),
    ("lang", "tweet_language"),
    ("created_at", "tweet_timestamp"),
];

pub const TSV_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// One projected row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TsvRow {
    pub author_user_name: String,
    pub tweet: String,
    pub tweet_language: String,
    pub tweet_timestamp: String,
}

impl TsvRow {
    /// Project a record; `row` is the 0-based record index used in error reports.
    pub fn from_record(record: &Record, row: usize) -> Result<Self> {
        let text = |key: &str| record.get_text(key).unwrap_or_default();
        Ok(Self {
            author_user_name: text(TSV_COLUMNS[0].0),
            tweet: text(TSV_COLUMNS[1].0).replace('\n', " "),
            tweet_language: text(TSV_COLUMNS[2].0),
            tweet_timestamp: reformat_timestamp(&text(TSV_COLUMNS[3].0), row)?,
        })
    }

    fn cells(&self) -> [&str; 4] {
        [
            &self.author_user_name,
            &self.tweet,
            &self.tweet_language,
            &self.tweet_timestamp,
        ]
    }
}

/// Re-parse an ISO-8601 timestamp into `YYYY-MM-DD HH:MM:SS` (UTC).
/// The empty placeholder is rejected like any other malformed value.
pub fn reformat_timestamp(iso: &str, row: usize) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(iso).map_err(|e| TetlError::Format {
        row,
        value: iso.to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed.with_timezone(&Utc).format(TSV_TIMESTAMP).to_string())
}

/// Minimal quoting: wrap cells holding a tab, a quote, or a line break (`\r`, `\n`), doubling quotes.
fn quote_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(['\t', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

fn write_line<W: Write>(w: &mut W, cells: [&str; 4]) -> std::io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            w.write_all(b"\t")?;
        }
        w.write_all(quote_cell(cell).as_bytes())?;
    }
    w.write_all(b"\n")
}

/// Project every record first, then write header + rows. A bad timestamp anywhere
/// fails before a single byte reaches `w`. Returns the number of data rows.
pub fn write_tsv<W: Write>(records: &[Record], w: &mut W) -> Result<usize> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(i, r)| TsvRow::from_record(r, i))
        .collect::<Result<Vec<_>>>()?;

    let io_err = |e| TetlError::io("<tsv writer>", e);
    write_line(w, TSV_COLUMNS.map(|(_, col)| col)).map_err(io_err)?;
    for row in &rows {
        write_line(w, row.cells()).map_err(io_err)?;
    }
    Ok(rows.len())
}

/// Render the table and write it to `path` atomically (UTF-8). Returns the data row count.
pub fn write_tsv_file(records: &[Record], path: &Path) -> Result<usize> {
    let mut buf = Vec::with_capacity(records.len() * 160);
    let n = write_tsv(records, &mut buf)?;
    write_atomic(path, &buf)?;
    tracing::debug!("wrote {} rows to {}", n, path.display());
    Ok(n)
}
