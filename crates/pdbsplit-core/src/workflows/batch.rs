use crate::core::io::completion_log::{CompletionLog, CompletionLogError};
use crate::core::io::discovery::{InputFile, discover_inputs};
use crate::core::io::tables::{TableError, TableSink};
use crate::core::models::region::{StructuredRegion, UnstructuredResult};
use crate::core::segmentation::Segmentation;
use crate::core::sequence::traits::SequenceSource;
use crate::engine::config::BatchConfig;
use crate::engine::error::{BatchError, FileFailure};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::worker::{FileOutcome, run_worker};
use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc;
use tracing::{info, instrument, warn};

/// Everything produced by the files that succeeded during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub structured: Vec<StructuredRegion>,
    pub unstructured: Vec<UnstructuredResult>,
}

impl BatchResult {
    fn absorb(&mut self, segmentation: Segmentation) {
        self.structured.extend(segmentation.structured);
        self.unstructured.push(segmentation.unstructured);
    }

    pub fn is_empty(&self) -> bool {
        self.structured.is_empty() && self.unstructured.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Input files found in the directory.
    pub discovered: usize,
    /// Input files skipped because the completion log already lists them.
    pub skipped: usize,
    /// Input files handed to the worker pool.
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct BatchReport {
    pub result: BatchResult,
    /// The completed set after this run: the previous log plus every newly succeeded file.
    pub completed: HashSet<String>,
    pub failures: Vec<FileFailure>,
    pub summary: BatchSummary,
    /// Set when rows could not be handed to the table sink. The completion log was not updated
    /// past the last chunk that was written, so the affected files stay pending.
    pub output_error: Option<TableError>,
    /// Set when the final save of the completion log failed. The rows are written, but the next
    /// run will reprocess this run's files.
    pub log_error: Option<CompletionLogError>,
}

impl BatchReport {
    /// True when there was nothing pending: no file was processed and nothing was written.
    pub fn is_noop(&self) -> bool {
        self.summary.submitted == 0
    }
}

/// Splits `discovered` into the files still pending and the number already completed.
pub fn pending_inputs(
    discovered: Vec<InputFile>,
    completed: &HashSet<String>,
) -> (Vec<InputFile>, usize) {
    let total = discovered.len();
    let pending: Vec<InputFile> = discovered
        .into_iter()
        .filter(|input| !completed.contains(&input.id))
        .collect();
    let skipped = total - pending.len();
    (pending, skipped)
}

/// Runs a resumable batch over the structure files in `input_dir`.
///
/// Files listed in `log` are skipped. The rest are processed by a pool of
/// [`BatchConfig::workers`] threads; a failing file never affects its siblings and stays out of
/// the completion log. Rows go to `sink` before the files they belong to are recorded in `log`:
/// once all files have reported back, and additionally every [`BatchConfig::checkpoint_every`]
/// successes when that is set. When nothing is pending the run returns without touching the
/// sink or the log.
#[instrument(skip_all, name = "batch_workflow", fields(input = %input_dir.display()))]
pub fn run<S, L, K>(
    input_dir: &Path,
    log: &L,
    sink: &mut K,
    source: &S,
    config: &BatchConfig,
    reporter: &ProgressReporter,
) -> Result<BatchReport, BatchError>
where
    S: SequenceSource + Sync + ?Sized,
    L: CompletionLog + ?Sized,
    K: TableSink + ?Sized,
{
    let previous = log.load();
    let discovered =
        discover_inputs(input_dir, &config.extension).map_err(|e| BatchError::InputDirectory {
            path: input_dir.to_string_lossy().to_string(),
            source: e,
        })?;
    info!(
        discovered = discovered.len(),
        previously_completed = previous.len(),
        "Scanned input directory."
    );
    run_files(discovered, previous, log, sink, source, config, reporter)
}

/// Rows of the run's result that have already been handed to the sink.
#[derive(Default)]
struct Flushed {
    structured: usize,
    unstructured: usize,
}

impl Flushed {
    /// Hands every row not yet written to `sink`.
    fn flush<K>(&mut self, sink: &mut K, result: &BatchResult) -> Result<(), TableError>
    where
        K: TableSink + ?Sized,
    {
        sink.write_rows(
            &result.structured[self.structured..],
            &result.unstructured[self.unstructured..],
        )?;
        self.structured = result.structured.len();
        self.unstructured = result.unstructured.len();
        Ok(())
    }
}

/// Same as [`run`], over an explicit file list and previously completed set.
fn run_files<S, L, K>(
    discovered: Vec<InputFile>,
    previous: HashSet<String>,
    log: &L,
    sink: &mut K,
    source: &S,
    config: &BatchConfig,
    reporter: &ProgressReporter,
) -> Result<BatchReport, BatchError>
where
    S: SequenceSource + Sync + ?Sized,
    L: CompletionLog + ?Sized,
    K: TableSink + ?Sized,
{
    let discovered_count = discovered.len();
    let (pending, skipped) = pending_inputs(discovered, &previous);
    let mut summary = BatchSummary {
        discovered: discovered_count,
        skipped,
        submitted: pending.len(),
        ..BatchSummary::default()
    };

    if pending.is_empty() {
        info!(skipped, "All input files have already been processed.");
        return Ok(BatchReport {
            result: BatchResult::default(),
            completed: previous,
            failures: Vec::new(),
            summary,
            output_error: None,
            log_error: None,
        });
    }

    info!(
        pending = pending.len(),
        skipped,
        workers = config.workers,
        "Processing structure files."
    );
    reporter.report(Progress::BatchStart {
        total: pending.len() as u64,
        skipped: skipped as u64,
    });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("pdbsplit-worker-{}", i))
        .build()?;

    let mut result = BatchResult::default();
    let mut completed = previous;
    let mut failures = Vec::new();
    let mut flushed = Flushed::default();
    let mut output_error: Option<TableError> = None;

    let (sender, receiver) = mpsc::channel::<(String, FileOutcome)>();
    pool.in_place_scope(|scope| {
        for input in pending {
            let sender = sender.clone();
            scope.spawn(move |_| {
                let outcome = run_worker(source, &input, config);
                if sender.send((input.id, outcome)).is_err() {
                    warn!("Result channel closed before a worker could report back.");
                }
            });
        }
        drop(sender);

        // Completions arrive in whatever order the workers finish.
        for (file_id, outcome) in receiver {
            match outcome {
                Ok(segmentation) => {
                    info!(
                        file = %file_id,
                        regions = segmentation.structured.len(),
                        "Processed structure file."
                    );
                    result.absorb(segmentation);
                    completed.insert(file_id.clone());
                    summary.succeeded += 1;
                    reporter.report(Progress::FileFinished {
                        file_id,
                        succeeded: true,
                    });

                    let due = config
                        .checkpoint_every
                        .is_some_and(|every| summary.succeeded % every == 0);
                    if due && output_error.is_none() {
                        if let Err(e) = flushed.flush(sink, &result) {
                            output_error = Some(e);
                        } else {
                            checkpoint(log, &completed, reporter);
                        }
                    }
                }
                Err(failure) => {
                    warn!(
                        file = %failure.file_id,
                        path = %failure.path.display(),
                        "Error processing file: {}",
                        failure.error
                    );
                    summary.failed += 1;
                    reporter.report(Progress::FileFinished {
                        file_id,
                        succeeded: false,
                    });
                    failures.push(failure);
                }
            }
        }
    });

    if output_error.is_none() {
        if let Err(e) = flushed.flush(sink, &result) {
            output_error = Some(e);
        }
    }

    let log_error = if let Some(e) = &output_error {
        warn!(
            "Failed to write output rows, completion log left at its last saved state: {}",
            e
        );
        None
    } else {
        match log.save(&completed) {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to persist completion log: {}", e);
                Some(e)
            }
        }
    };

    reporter.report(Progress::BatchFinish);
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Batch finished."
    );

    Ok(BatchReport {
        result,
        completed,
        failures,
        summary,
        output_error,
        log_error,
    })
}

fn checkpoint<L>(log: &L, completed: &HashSet<String>, reporter: &ProgressReporter)
where
    L: CompletionLog + ?Sized,
{
    match log.save(completed) {
        Ok(()) => reporter.report(Progress::Checkpoint {
            completed: completed.len(),
        }),
        Err(e) => {
            warn!("Checkpoint of completion log failed: {}", e);
            reporter.message(format!("Checkpoint skipped: {}", e));
        }
    }
}
