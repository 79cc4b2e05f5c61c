use super::models::SourceKind;
use pdbsplit::core::sequence::pdb_tools::{DEFAULT_SELRES_COMMAND, DEFAULT_TOFASTA_COMMAND};
use pdbsplit::engine::config::{DEFAULT_EXTENSION, default_workers};
use pdbsplit::workflows::fasta::DEFAULT_FASTA_EXTENSION;

pub struct DefaultsConfig {
    pub workers: usize,
    pub extension: String,
    pub require_annotations: bool,
    pub source: SourceKind,
    pub tofasta_command: String,
    pub selres_command: String,
    pub structured_table: String,
    pub unstructured_table: String,
    pub completion_log: String,
    pub append: bool,
    pub fasta_extension: String,
    pub fasta_table: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            extension: DEFAULT_EXTENSION.to_string(),
            require_annotations: false,
            source: SourceKind::Native,
            tofasta_command: DEFAULT_TOFASTA_COMMAND.to_string(),
            selres_command: DEFAULT_SELRES_COMMAND.to_string(),
            structured_table: "structured_ranges.csv".to_string(),
            unstructured_table: "unstructured_sequences.csv".to_string(),
            completion_log: "processed_files_log.csv".to_string(),
            append: false,
            fasta_extension: DEFAULT_FASTA_EXTENSION.to_string(),
            fasta_table: "fasta_records.csv".to_string(),
        }
    }
}
