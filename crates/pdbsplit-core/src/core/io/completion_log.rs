use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Persisted set of file identifiers that a previous run finished successfully.
///
/// This is the only resumability mechanism: a batch run skips every identifier returned by
/// [`load`](CompletionLog::load) and writes the grown set back through
/// [`save`](CompletionLog::save).
pub trait CompletionLog {
    /// Loads the completed set. A missing or unreadable log yields an empty set.
    fn load(&self) -> HashSet<String>;

    /// Replaces the persisted set with `completed`.
    fn save(&self, completed: &HashSet<String>) -> Result<(), CompletionLogError>;
}

#[derive(Debug, Error)]
pub enum CompletionLogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Failed to move completion log into place at '{path}': {source}")]
    Persist {
        path: String,
        source: tempfile::PersistError,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    #[serde(rename = "PDB_ID")]
    file_id: String,
}

/// Single-column CSV completion log (`PDB_ID` header).
#[derive(Debug, Clone)]
pub struct CsvCompletionLog {
    path: PathBuf,
}

impl CsvCompletionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn read_rows(&self) -> Result<HashSet<String>, CompletionLogError> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| CompletionLogError::Csv {
            path: self.path_string(),
            source: e,
        })?;
        let mut completed = HashSet::new();
        for result in reader.deserialize::<LogRow>() {
            let row = result.map_err(|e| CompletionLogError::Csv {
                path: self.path_string(),
                source: e,
            })?;
            completed.insert(row.file_id);
        }
        Ok(completed)
    }
}

impl CompletionLog for CsvCompletionLog {
    fn load(&self) -> HashSet<String> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No completion log found; starting fresh.");
            return HashSet::new();
        }
        match self.read_rows() {
            Ok(completed) => {
                debug!(
                    path = %self.path.display(),
                    entries = completed.len(),
                    "Loaded completion log."
                );
                completed
            }
            Err(e) => {
                warn!("Ignoring unreadable completion log: {}", e);
                HashSet::new()
            }
        }
    }

    fn save(&self, completed: &HashSet<String>) -> Result<(), CompletionLogError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |e| CompletionLogError::Io {
            path: self.path_string(),
            source: e,
        };

        let mut staging = NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let mut writer = csv::Writer::from_writer(staging.as_file_mut());
            // Keep the rows sorted so that an unchanged set rewrites an identical file.
            let ordered: BTreeSet<&String> = completed.iter().collect();
            if ordered.is_empty() {
                writer
                    .write_record(["PDB_ID"])
                    .map_err(|e| CompletionLogError::Csv {
                        path: self.path_string(),
                        source: e,
                    })?;
            }
            for file_id in ordered {
                writer
                    .serialize(LogRow {
                        file_id: file_id.clone(),
                    })
                    .map_err(|e| CompletionLogError::Csv {
                        path: self.path_string(),
                        source: e,
                    })?;
            }
            writer.flush().map_err(io_err)?;
        }
        staging.as_file_mut().sync_all().map_err(io_err)?;
        staging
            .persist(&self.path)
            .map_err(|e| CompletionLogError::Persist {
                path: self.path_string(),
                source: e,
            })?;
        debug!(
            path = %self.path.display(),
            entries = completed.len(),
            "Saved completion log."
        );
        Ok(())
    }
}

/// Completion log kept in memory, for embedding the driver without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryCompletionLog {
    completed: Mutex<HashSet<String>>,
    saves: Mutex<usize>,
}

impl MemoryCompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed: Mutex::new(ids.into_iter().map(Into::into).collect()),
            saves: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.completed
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Number of times [`save`](CompletionLog::save) has been called.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|guard| *guard).unwrap_or_default()
    }
}

impl CompletionLog for MemoryCompletionLog {
    fn load(&self) -> HashSet<String> {
        self.snapshot()
    }

    fn save(&self, completed: &HashSet<String>) -> Result<(), CompletionLogError> {
        if let Ok(mut guard) = self.completed.lock() {
            *guard = completed.clone();
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn load_returns_empty_set_when_log_is_missing() {
        let dir = tempdir().unwrap();
        let log = CsvCompletionLog::new(dir.path().join("processed_files_log.csv"));
        assert!(log.load().is_empty());
    }

    #[test]
    fn save_then_load_restores_the_set() {
        let dir = tempdir().unwrap();
        let log = CsvCompletionLog::new(dir.path().join("log.csv"));
        let completed = ids(&["1ABC", "2XYZ", "3DEF"]);

        log.save(&completed).unwrap();

        assert_eq!(log.load(), completed);
    }

    #[test]
    fn save_writes_sorted_single_column_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let log = CsvCompletionLog::new(&path);

        log.save(&ids(&["B", "C", "A"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "PDB_ID\nA\nB\nC\n");
    }

    #[test]
    fn save_of_empty_set_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let log = CsvCompletionLog::new(&path);

        log.save(&HashSet::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "PDB_ID\n");
        assert!(log.load().is_empty());
    }

    #[test]
    fn load_reads_log_written_by_other_tools() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "PDB_ID\n1ABC\n4HHB\n").unwrap();

        let log = CsvCompletionLog::new(&path);

        assert_eq!(log.load(), ids(&["1ABC", "4HHB"]));
    }

    #[test]
    fn load_ignores_log_with_wrong_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "something_else\n1ABC\n").unwrap();

        let log = CsvCompletionLog::new(&path);

        assert!(log.load().is_empty());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let log = CsvCompletionLog::new(dir.path().join("missing").join("log.csv"));

        let result = log.save(&ids(&["1ABC"]));

        assert!(matches!(result, Err(CompletionLogError::Io { .. })));
    }

    #[test]
    fn memory_log_counts_saves() {
        let log = MemoryCompletionLog::with_completed(["1ABC"]);
        assert_eq!(log.load(), ids(&["1ABC"]));

        log.save(&ids(&["1ABC", "2XYZ"])).unwrap();

        assert_eq!(log.snapshot(), ids(&["1ABC", "2XYZ"]));
        assert_eq!(log.save_count(), 1);
    }
}
