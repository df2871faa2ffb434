use tabled::builder::Builder;
use tabled::settings::Style;

use crate::rows::Row;

/// The bounded, index-prefixed slice of rows prepared for one display or
/// export pass. Indices are contiguous from 0 and reflect position in the
/// underlying file; row 0 is the header line.
pub type TableView = Vec<(usize, Row)>;

/// Render a table view as a boxed fixed-width grid.
///
/// Pure function of its input; short rows are padded by the builder so
/// ragged files still render.
pub fn render_grid(view: &TableView) -> String {
    let mut builder = Builder::default();

    for (index, row) in view {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(index.to_string());
        record.extend(row.iter().map(|cell| cell.to_string()));
        builder.push_record(record);
    }

    builder.build().with(Style::modern()).to_string()
}
