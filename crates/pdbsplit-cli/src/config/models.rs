use pdbsplit::engine::config::BatchConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Read residues directly from ATOM/HETATM records.
    Native,
    /// Run the `pdb_tofasta` and `pdb_selres` command-line tools.
    PdbTools,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub tofasta_command: String,
    pub selres_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub structured_table: PathBuf,
    pub unstructured_table: PathBuf,
    pub completion_log: PathBuf,
    pub append: bool,
}

pub struct AppConfig {
    pub input_dir: PathBuf,
    pub batch: BatchConfig,
    pub source: SourceSettings,
    pub output: OutputSettings,
}

pub struct StatusConfig {
    pub input_dir: PathBuf,
    pub extension: String,
    pub completion_log: PathBuf,
}
