use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::TabbyResult;
use crate::export;
use crate::render::{self, TableView};
use crate::rows::RowSource;
use crate::session::Session;

/// Rows taken by Display when the limit entry is blank: the header plus ten
/// data rows.
pub const DEFAULT_DISPLAY_CUTOFF: usize = 11;

/// The view controller: owns the session and runs the user-triggered
/// operations against it. Every operation returns data and typed errors;
/// the shells decide how to surface them.
///
/// A requested limit of N yields N + 1 rows: the header counts as row 0
/// and data starts at row 1.
#[derive(Debug, Default)]
pub struct Viewer {
    session: Session,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Make `path` the current file. The shells follow this with a display
    /// pass and reset their limit entry and output area.
    pub fn open(&mut self, path: PathBuf) {
        info!(path = %path.display(), "file opened");
        self.session.open(path);
    }

    /// Render the first rows of the current file as a grid. `None` when no
    /// file is open.
    pub fn display(&mut self, limit: Option<usize>) -> TabbyResult<Option<String>> {
        let Some(path) = self.current_path() else {
            return Ok(None);
        };

        let cutoff = limit.map_or(DEFAULT_DISPLAY_CUTOFF, |n| n + 1);
        let view = self.guard(collect_view(&path, Some(cutoff)))?;
        Ok(Some(render::render_grid(&view)))
    }

    /// Scan the whole file and report the row count, excluding the header
    /// line. `None` when no file is open. Blocks until the scan finishes.
    pub fn count_rows(&mut self) -> TabbyResult<Option<usize>> {
        let Some(path) = self.current_path() else {
            return Ok(None);
        };

        let total = self.guard(count_all(&path))?;
        Ok(Some(total.saturating_sub(1)))
    }

    /// Write a copy of the current file next to it, truncated to
    /// `limit + 1` rows when a limit is given. `None` when no file is open.
    pub fn export(&mut self, limit: Option<usize>) -> TabbyResult<Option<PathBuf>> {
        let Some(path) = self.current_path() else {
            return Ok(None);
        };

        let cutoff = limit.map(|n| n + 1);
        let output = self.guard(export::export(&path, cutoff))?;
        Ok(Some(output))
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.session.current().map(Path::to_path_buf)
    }

    /// Load-rejected outcomes forget the current file; everything else
    /// leaves the session alone.
    fn guard<T>(&mut self, result: TabbyResult<T>) -> TabbyResult<T> {
        if let Err(error) = &result {
            if error.is_load_rejection() {
                self.session.clear();
            }
        }
        result
    }
}

fn collect_view(path: &Path, cutoff: Option<usize>) -> TabbyResult<TableView> {
    let mut view = TableView::new();
    for (i, row) in RowSource::open(path)?.enumerate() {
        if let Some(cutoff) = cutoff {
            if i >= cutoff {
                break;
            }
        }
        view.push((i, row?));
    }
    Ok(view)
}

fn count_all(path: &Path) -> TabbyResult<usize> {
    let mut total = 0;
    for row in RowSource::open(path)? {
        row?;
        total += 1;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TabbyError;
    use tempfile::tempdir;

    fn grid_rows(grid: &str) -> usize {
        grid.lines().filter(|line| line.starts_with('│')).count()
    }

    #[test]
    fn test_operations_are_noops_without_a_file() {
        let mut viewer = Viewer::new();
        assert!(viewer.display(None).unwrap().is_none());
        assert!(viewer.count_rows().unwrap().is_none());
        assert!(viewer.export(None).unwrap().is_none());
    }

    #[test]
    fn test_display_limit_includes_header_as_row_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.csv");
        let mut content = String::from("h1,h2\n");
        for i in 1..20 {
            content.push_str(&format!("a{i},b{i}\n"));
        }
        std::fs::write(&path, content).unwrap();

        let mut viewer = Viewer::new();
        viewer.open(path);

        let grid = viewer.display(Some(5)).unwrap().unwrap();
        assert_eq!(grid_rows(&grid), 6);
        assert!(grid.contains("a5"));
        assert!(!grid.contains("a6"));
    }

    #[test]
    fn test_rejected_load_clears_the_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let mut viewer = Viewer::new();
        viewer.open(path);

        assert!(matches!(
            viewer.display(None),
            Err(TabbyError::EmptyFile { .. })
        ));
        assert!(!viewer.session().is_open());

        // and the next operation is a no-op again
        assert!(viewer.count_rows().unwrap().is_none());
    }

    #[test]
    fn test_workbook_failure_keeps_the_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let mut viewer = Viewer::new();
        viewer.open(path);

        assert!(matches!(
            viewer.display(None),
            Err(TabbyError::WorkbookLoad { .. })
        ));
        assert!(viewer.session().is_open());
    }
}
