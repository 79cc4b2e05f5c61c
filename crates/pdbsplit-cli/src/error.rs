use pdbsplit::core::io::completion_log::CompletionLogError;
use pdbsplit::core::io::tables::TableError;
use pdbsplit::engine::error::BatchError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write output table: {0}")]
    Output(#[source] TableError),

    #[error(
        "Failed to write output tables; files not yet recorded in the completion log stay pending: {0}"
    )]
    BatchOutput(#[source] TableError),

    #[error(
        "Completion log could not be saved; files from this run will be reprocessed next time: {0}"
    )]
    LogPersistence(#[from] CompletionLogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
