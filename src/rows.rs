use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader as SheetReader, Xlsx};
use csv::ReaderBuilder;
use tracing::debug;

use crate::delimiter::{self, Delimiter};
use crate::error::{TabbyError, TabbyResult};

/// One cell value from a source file.
///
/// CSV fields are always `Text`, exactly as read; typed values only come
/// from spreadsheet cells. Blank spreadsheet cells are `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => {
                // Integral floats print without the trailing ".0"
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

/// One record of cell values, in original column order.
pub type Row = Vec<Cell>;

/// A finite, restartable sequence of rows read from one file.
///
/// Each `open` call reopens the file from the start; there is no persisted
/// cursor. Dropping the source releases the underlying handle, including
/// when iteration stops early at a display cutoff.
pub struct RowSource {
    path: PathBuf,
    backend: Backend,
}

enum Backend {
    /// Streaming CSV records; the delimiter was fixed from the first line.
    /// The csv reader skips blank physical lines, so they are reinserted
    /// as empty rows from the line-position bookkeeping below; indices and
    /// counts always reflect file lines.
    Delimited {
        delimiter: Delimiter,
        records: csv::StringRecordsIntoIter<File>,
        /// first physical line the reader has not consumed yet
        cursor_line: u64,
        /// blank rows still owed before the next record
        pending_blanks: usize,
        /// record already parsed but held back behind its blank lines
        queued: Option<Row>,
        finished: bool,
    },
    /// Spreadsheets are decoded up front; calamine materializes the used
    /// range of the first sheet in memory anyway.
    Sheet(std::vec::IntoIter<Row>),
}

impl RowSource {
    /// Open a row source for `path`, dispatching on its extension.
    pub fn open(path: &Path) -> TabbyResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let backend = match extension.as_str() {
            "csv" => Self::open_delimited(path)?,
            "xlsx" => Self::open_sheet(path)?,
            _ => return Err(TabbyError::unsupported_format(path)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            backend,
        })
    }

    fn open_delimited(path: &Path) -> TabbyResult<Backend> {
        // Rejects empty files and unrecognized delimiters before any
        // record is parsed.
        let delimiter = delimiter::sniff_path(path)?;
        debug!(path = %path.display(), delimiter = %delimiter.as_char(), "opening delimited file");

        let reader = ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| TabbyError::csv(path, e))?;

        Ok(Backend::Delimited {
            delimiter,
            records: reader.into_records(),
            cursor_line: 1,
            pending_blanks: 0,
            queued: None,
            finished: false,
        })
    }

    fn open_sheet(path: &Path) -> TabbyResult<Backend> {
        let mut workbook = open_workbook::<Xlsx<_>, _>(path)
            .map_err(|e| TabbyError::workbook_load_with_source(path, e.to_string(), e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TabbyError::workbook_load(path, "workbook has no sheets"))?
            .map_err(|e| TabbyError::workbook_load_with_source(path, e.to_string(), e))?;

        debug!(path = %path.display(), rows = range.height(), "loaded first sheet");

        let rows: Vec<Row> = range
            .rows()
            .map(|cells| cells.iter().map(Cell::from).collect())
            .collect();

        Ok(Backend::Sheet(rows.into_iter()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The delimiter fixed for this pass, for delimited sources.
    pub fn delimiter(&self) -> Option<Delimiter> {
        match &self.backend {
            Backend::Delimited { delimiter, .. } => Some(*delimiter),
            Backend::Sheet(_) => None,
        }
    }
}

impl Iterator for RowSource {
    type Item = TabbyResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.backend {
            Backend::Delimited {
                records,
                cursor_line,
                pending_blanks,
                queued,
                finished,
                ..
            } => {
                if *pending_blanks > 0 {
                    *pending_blanks -= 1;
                    return Some(Ok(Row::new()));
                }
                if let Some(row) = queued.take() {
                    return Some(Ok(row));
                }
                if *finished {
                    return None;
                }
                match records.next() {
                    Some(Ok(record)) => {
                        // lines jumped over since the last record are the
                        // blank lines the reader dropped
                        let start = record.position().map_or(*cursor_line, |p| p.line());
                        let skipped = start.saturating_sub(*cursor_line) as usize;
                        *cursor_line = records.reader().position().line();

                        let row: Row = record
                            .iter()
                            .map(|field| Cell::Text(field.to_string()))
                            .collect();
                        if skipped > 0 {
                            *pending_blanks = skipped - 1;
                            *queued = Some(row);
                            Some(Ok(Row::new()))
                        } else {
                            Some(Ok(row))
                        }
                    }
                    Some(Err(e)) => Some(Err(TabbyError::csv(&self.path, e))),
                    None => {
                        *finished = true;
                        // blank lines between the last record and EOF
                        let end = records.reader().position().line();
                        let skipped = end.saturating_sub(*cursor_line) as usize;
                        *cursor_line = end;
                        if skipped > 0 {
                            *pending_blanks = skipped - 1;
                            Some(Ok(Row::new()))
                        } else {
                            None
                        }
                    }
                }
            }
            Backend::Sheet(rows) => rows.next().map(Ok),
        }
    }
}
