use crate::config::models::SourceKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "pdbsplit contributors",
    version,
    about = "pdbsplit - Split annotated PDB files into secondary-structure and unstructured sequence tables, resumably and in parallel.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process every pending structure file in a directory and write the output tables.
    Run(RunArgs),
    /// Show how many structure files in a directory are completed and how many are pending.
    Status(StatusArgs),
    /// Collect the records of every FASTA file in a directory into one CSV table.
    Fasta(FastaArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Directory containing the input structure files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Batch Overrides ---
    /// Number of files processed in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub workers: Option<usize>,

    /// Extension of the input files (e.g., 'pdb', 'ent').
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Treat files without HELIX/SHEET records as failures so they stay pending.
    #[arg(long)]
    pub require_annotations: bool,

    /// Write rows and save the completion log after every N successfully processed files.
    /// Requires --append.
    #[arg(long, value_name = "N")]
    pub checkpoint_every: Option<usize>,

    // --- Sequence Source Overrides ---
    /// How residue sequences are extracted from structure files.
    #[arg(short, long, value_enum, value_name = "KIND")]
    pub source: Option<SourceKind>,

    /// Command used to convert a structure file into FASTA (pdb-tools source).
    #[arg(long, value_name = "CMD")]
    pub tofasta_command: Option<String>,

    /// Command used to select a residue range from a structure file (pdb-tools source).
    #[arg(long, value_name = "CMD")]
    pub selres_command: Option<String>,

    // --- Output Overrides ---
    /// Path of the structured-region table.
    #[arg(long, value_name = "PATH")]
    pub structured_out: Option<PathBuf>,

    /// Path of the unstructured-sequence table.
    #[arg(long, value_name = "PATH")]
    pub unstructured_out: Option<PathBuf>,

    /// Path of the completion log used to resume across runs.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub completion_log: Option<PathBuf>,

    /// Append rows to existing output tables instead of replacing them.
    #[arg(long)]
    pub append: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S batch.workers=8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `status` subcommand.
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Directory containing the input structure files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extension of the input files (e.g., 'pdb', 'ent').
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Path of the completion log used to resume across runs.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub completion_log: Option<PathBuf>,

    /// List the identifiers of pending files.
    #[arg(long)]
    pub list: bool,
}

/// Arguments for the `fasta` subcommand.
#[derive(Args, Debug, Default)]
pub struct FastaArgs {
    /// Directory containing the FASTA files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Path of the output table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Extension of the FASTA files.
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Number of files read in parallel.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub workers: Option<usize>,
}
