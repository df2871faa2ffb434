use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::delimiter;
use crate::error::{TabbyError, TabbyResult};
use crate::rows::{Cell, RowSource};

/// Pick the output name for an export: `<stem>_output.<ext>` beside the
/// input, then `<stem>_output_1.<ext>`, `_output_2`, ... until a free name
/// is found.
pub fn resolve_output_path(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut candidate = dir.join(format!("{stem}_output.{extension}"));
    let mut counter = 0;
    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{stem}_output_{counter}.{extension}"));
    }
    candidate
}

/// Write up to `cutoff` rows of `input` to a fresh sibling file in the same
/// format. `None` writes every row. Returns the output path.
pub fn export(input: &Path, cutoff: Option<usize>) -> TabbyResult<PathBuf> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => export_csv(input, cutoff),
        "xlsx" => export_xlsx(input, cutoff),
        _ => Err(TabbyError::unsupported_format(input)),
    }
}

fn export_csv(input: &Path, cutoff: Option<usize>) -> TabbyResult<PathBuf> {
    // Same rejection path as reading: an unrecognized delimiter aborts
    // before any output file is created.
    let delimiter = delimiter::sniff_path(input)?;
    let output = resolve_output_path(input);

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_path(&output)
        .map_err(|e| TabbyError::csv(&output, e))?;

    let mut written = 0usize;
    for (i, row) in RowSource::open(input)?.enumerate() {
        if let Some(cutoff) = cutoff {
            if i >= cutoff {
                break;
            }
        }
        let row = row?;
        if row.is_empty() {
            // blank physical line: one empty field writes a bare terminator
            writer
                .write_record([""])
                .map_err(|e| TabbyError::csv(&output, e))?;
        } else {
            writer
                .write_record(row.iter().map(|cell| cell.to_string()))
                .map_err(|e| TabbyError::csv(&output, e))?;
        }
        written += 1;
    }
    writer
        .flush()
        .map_err(|e| TabbyError::file_io(&output, e))?;

    info!(output = %output.display(), rows = written, "table saved");
    Ok(output)
}

fn export_xlsx(input: &Path, cutoff: Option<usize>) -> TabbyResult<PathBuf> {
    let output = resolve_output_path(input);

    // Fresh single-sheet workbook; values only, no styles carried over.
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let mut written = 0usize;
    for (i, row) in RowSource::open(input)?.enumerate() {
        if let Some(cutoff) = cutoff {
            if i >= cutoff {
                break;
            }
        }
        let row = row?;
        for (col, cell) in row.iter().enumerate() {
            let (r, c) = (i as u32, col as u16);
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet
                        .write_string(r, c, s.as_str())
                        .map_err(|e| TabbyError::workbook_write(&output, e))?;
                }
                Cell::Number(n) => {
                    sheet
                        .write_number(r, c, *n)
                        .map_err(|e| TabbyError::workbook_write(&output, e))?;
                }
                Cell::Bool(b) => {
                    sheet
                        .write_boolean(r, c, *b)
                        .map_err(|e| TabbyError::workbook_write(&output, e))?;
                }
            }
        }
        written += 1;
    }

    workbook
        .save(&output)
        .map_err(|e| TabbyError::workbook_write(&output, e))?;

    info!(output = %output.display(), rows = written, "workbook saved");
    Ok(output)
}
