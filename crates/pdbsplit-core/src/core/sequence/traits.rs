use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceSourceError {
    #[error("Scratch file operation failed during {operation}: {source}")]
    TempResource {
        operation: &'static str,
        source: std::io::Error,
    },
}

/// Supplies residue sequences for structure files.
///
/// Extraction failures are not errors: implementations log a warning and return an empty
/// string, so a single bad region degrades to an empty sequence instead of failing its file.
/// Only scratch-resource failures are reported through `Err`.
pub trait SequenceSource {
    /// The complete one-letter residue sequence of `path`.
    fn full_sequence(&self, path: &Path) -> Result<String, SequenceSourceError>;

    /// The one-letter sequence of residues numbered `start..=end` in `path`.
    fn sub_sequence(
        &self,
        path: &Path,
        start: isize,
        end: isize,
    ) -> Result<String, SequenceSourceError>;
}
