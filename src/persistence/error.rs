//! Persistence-specific error helpers

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{BenchError, BenchResult};

/// Attach the history file path to an I/O failure
pub trait HistoryErrorContext<T> {
    fn history_context(self, path: &Path) -> BenchResult<T>;
}

impl<T> HistoryErrorContext<T> for Result<T, std::io::Error> {
    fn history_context(self, path: &Path) -> BenchResult<T> {
        self.map_err(|error| history_io(path, error))
    }
}

pub fn history_io(path: impl AsRef<Path>, error: std::io::Error) -> BenchError {
    BenchError::HistoryIo {
        path: path.as_ref().display().to_string(),
        error,
    }
}

/// Write `data` to a sibling temp file, then rename it over `path`.
///
/// Readers never observe a partially written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> BenchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).history_context(parent)?;
    }

    let mut temp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result.history_context(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        atomic_write(&path, b"[1]").unwrap();
        atomic_write(&path, b"[1,2]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2]");
        assert!(!dir.path().join("nested").join("history.json.tmp").exists());
    }

    #[test]
    fn test_error_names_path() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
            .history_context(Path::new("runs.json"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("runs.json"));
        assert!(message.contains("disk on fire"));
    }
}
