use crate::core::io::records::RecordParseErrorKind;
use crate::core::sequence::traits::SequenceSourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single input file could not be processed.
///
/// These never abort a batch; the driver records them and leaves the file pending.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read structure file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Malformed record on line {line}: {kind}")]
    MalformedRecord {
        line: usize,
        kind: RecordParseErrorKind,
    },

    #[error(transparent)]
    TempResource(#[from] SequenceSourceError),

    #[error("No HELIX or SHEET records found")]
    NoAnnotations,

    #[error("Worker panicked: {0}")]
    WorkerPanic(String),
}

/// A per-file failure, tagged with the file it belongs to.
#[derive(Debug)]
pub struct FileFailure {
    pub file_id: String,
    pub path: PathBuf,
    pub error: EngineError,
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to read input directory '{path}': {source}")]
    InputDirectory {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
