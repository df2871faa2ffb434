use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for tabby
#[derive(Error, Debug)]
pub enum TabbyError {
    #[error("unsupported delimiter in {path}")]
    UnsupportedDelimiter { path: PathBuf },

    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to load workbook {path}: {message}")]
    WorkbookLoad {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to write workbook {path}")]
    WorkbookWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("file I/O error: {path}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("general error: {0}")]
    General(#[from] anyhow::Error),
}

impl TabbyError {
    pub fn unsupported_delimiter(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedDelimiter { path: path.into() }
    }

    pub fn empty_file(path: impl Into<PathBuf>) -> Self {
        Self::EmptyFile { path: path.into() }
    }

    pub fn unsupported_format(path: &Path) -> Self {
        Self::UnsupportedFormat {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn workbook_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::WorkbookLoad {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn workbook_load_with_source(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::WorkbookLoad {
            path: path.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn workbook_write(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::WorkbookWrite {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Whether this failure rejects the whole load, which makes the session
    /// forget the current file. Workbook load failures deliberately do not;
    /// see DESIGN.md for the asymmetry.
    pub fn is_load_rejection(&self) -> bool {
        matches!(
            self,
            TabbyError::UnsupportedDelimiter { .. }
                | TabbyError::EmptyFile { .. }
                | TabbyError::UnsupportedFormat { .. }
        )
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TabbyError::UnsupportedDelimiter { .. } => {
                "Unsupported delimiter in the file. Only CSV files with ',' or ';' delimiters are supported.".to_string()
            }
            TabbyError::EmptyFile { .. } => {
                "The file cannot be read: it's empty.".to_string()
            }
            TabbyError::UnsupportedFormat { .. } => {
                "Unsupported file format. Only .csv and .xlsx files are supported.".to_string()
            }
            TabbyError::WorkbookLoad { message, .. } => {
                format!("Error loading XLSX file: {}", message)
            }
            TabbyError::WorkbookWrite { path, .. } => {
                format!("Could not write the workbook to {}.", path.display())
            }
            TabbyError::FileIo { path, .. } => {
                format!("File access error for {}. Check permissions and disk space.", path.display())
            }
            TabbyError::Csv { path, .. } => {
                format!("A record in {} could not be parsed.", path.display())
            }
            _ => "Something went wrong. Check the logs for details.".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type TabbyResult<T> = Result<T, TabbyError>;
