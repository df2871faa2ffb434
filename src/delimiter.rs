use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{TabbyError, TabbyResult};

/// Field separator of a delimited text file.
///
/// Decided from the first line alone and applied to the whole file;
/// comma wins when both characters appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Classify a sampled line. `None` means unrecognized.
pub fn detect(line: &str) -> Option<Delimiter> {
    if line.contains(',') {
        Some(Delimiter::Comma)
    } else if line.contains(';') {
        Some(Delimiter::Semicolon)
    } else {
        None
    }
}

/// Sample the first line of a file and classify it.
///
/// A file with no first line at all is an `EmptyFile` rejection; a first
/// line with neither separator is an `UnsupportedDelimiter` rejection.
pub fn sniff_path(path: &Path) -> TabbyResult<Delimiter> {
    let file = File::open(path).map_err(|e| TabbyError::file_io(path, e))?;
    let mut sample = String::new();
    let bytes_read = BufReader::new(file)
        .read_line(&mut sample)
        .map_err(|e| TabbyError::file_io(path, e))?;

    if bytes_read == 0 {
        return Err(TabbyError::empty_file(path));
    }

    detect(&sample).ok_or_else(|| TabbyError::unsupported_delimiter(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_comma_detected() {
        assert_eq!(detect("a,b,c"), Some(Delimiter::Comma));
    }

    #[test]
    fn test_semicolon_detected() {
        assert_eq!(detect("a;b;c"), Some(Delimiter::Semicolon));
    }

    #[test]
    fn test_comma_wins_over_semicolon() {
        assert_eq!(detect("a,b;c"), Some(Delimiter::Comma));
        assert_eq!(detect("a;b,c"), Some(Delimiter::Comma));
    }

    #[test]
    fn test_unrecognized_line() {
        assert_eq!(detect("a\tb\tc"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_sniff_uses_only_the_first_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "a;b").unwrap();
        writeln!(file, "1,2").unwrap();

        assert_eq!(sniff_path(&path).unwrap(), Delimiter::Semicolon);
    }

    #[test]
    fn test_sniff_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        File::create(&path).unwrap();

        assert!(matches!(
            sniff_path(&path),
            Err(TabbyError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_sniff_unrecognized_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipes.csv");
        std::fs::write(&path, "a|b|c\n").unwrap();

        assert!(matches!(
            sniff_path(&path),
            Err(TabbyError::UnsupportedDelimiter { .. })
        ));
    }
}
