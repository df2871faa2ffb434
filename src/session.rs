use std::path::{Path, PathBuf};

/// The record of which file is currently considered "open".
///
/// Owned by the view controller; empty at startup, set on open, cleared
/// when a load is rejected.
#[derive(Debug, Default)]
pub struct Session {
    current_file: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, path: PathBuf) {
        self.current_file = Some(path);
    }

    pub fn clear(&mut self) {
        self.current_file = None;
    }

    pub fn current(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.current_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::new();
        assert!(!session.is_open());

        session.open(PathBuf::from("data.csv"));
        assert_eq!(session.current(), Some(Path::new("data.csv")));

        session.clear();
        assert!(session.current().is_none());
    }
}
