use std::path::PathBuf;

use tracing::info;

use crate::error::TabbyResult;
use crate::viewer::Viewer;

/// Preview the first rows of a file as a grid on stdout.
pub fn display_command(path: PathBuf, rows: Option<usize>) -> TabbyResult<()> {
    info!(path = %path.display(), "displaying table");

    let mut viewer = Viewer::new();
    viewer.open(path);

    if let Some(grid) = viewer.display(rows)? {
        println!("{grid}");
    }
    Ok(())
}

/// Scan the whole file and print the data row count.
pub fn count_command(path: PathBuf) -> TabbyResult<()> {
    info!(path = %path.display(), "counting rows");

    let mut viewer = Viewer::new();
    viewer.open(path);

    if let Some(total) = viewer.count_rows()? {
        println!("Total Rows Available: {total} rows");
    }
    Ok(())
}

/// Save a truncated or full copy next to the input.
pub fn export_command(path: PathBuf, rows: Option<usize>) -> TabbyResult<()> {
    info!(path = %path.display(), "exporting table");

    let mut viewer = Viewer::new();
    viewer.open(path);

    if let Some(output) = viewer.export(rows)? {
        println!("Table saved to {}", output.display());
    }
    Ok(())
}
