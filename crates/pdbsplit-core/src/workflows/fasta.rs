use crate::core::io::discovery::{InputFile, discover_inputs};
use crate::core::io::fasta::{FastaError, FastaRecord, read_fasta_file};
use crate::engine::error::BatchError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const DEFAULT_FASTA_EXTENSION: &str = "fasta";

/// A FASTA file that could not be read. Its records are left out of the table.
#[derive(Debug)]
pub struct FastaFailure {
    pub path: PathBuf,
    pub error: FastaError,
}

#[derive(Debug, Default)]
pub struct FastaReport {
    /// Records of every readable file, grouped by file in name order.
    pub records: Vec<FastaRecord>,
    pub files_read: usize,
    pub failures: Vec<FastaFailure>,
}

/// Loads every file with the given extension in `input_dir` on a pool of `workers` threads.
///
/// A file that fails to parse is reported in [`FastaReport::failures`] and does not affect the
/// others.
#[instrument(skip_all, name = "fasta_workflow", fields(input = %input_dir.display()))]
pub fn run(
    input_dir: &Path,
    extension: &str,
    workers: usize,
    reporter: &ProgressReporter,
) -> Result<FastaReport, BatchError> {
    let inputs = discover_inputs(input_dir, extension).map_err(|e| BatchError::InputDirectory {
        path: input_dir.to_string_lossy().to_string(),
        source: e,
    })?;
    info!(files = inputs.len(), workers, "Loading FASTA files.");
    reporter.report(Progress::BatchStart {
        total: inputs.len() as u64,
        skipped: 0,
    });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("pdbsplit-fasta-{}", i))
        .build()?;

    let outcomes: Vec<(InputFile, Result<Vec<FastaRecord>, FastaError>)> = pool.install(|| {
        inputs
            .into_par_iter()
            .map(|input| {
                let outcome = read_fasta_file(&input.path);
                reporter.report(Progress::FileFinished {
                    file_id: input.id.clone(),
                    succeeded: outcome.is_ok(),
                });
                (input, outcome)
            })
            .collect()
    });

    let mut report = FastaReport::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(records) => {
                report.files_read += 1;
                report.records.extend(records);
            }
            Err(error) => {
                warn!(path = %input.path.display(), "Error reading FASTA file: {}", error);
                report.failures.push(FastaFailure {
                    path: input.path,
                    error,
                });
            }
        }
    }

    reporter.report(Progress::BatchFinish);
    info!(
        records = report.records.len(),
        files = report.files_read,
        failed = report.failures.len(),
        "FASTA files loaded."
    );
    Ok(report)
}
