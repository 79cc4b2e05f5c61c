use crate::cli::RunArgs;
use crate::config::builder::build_config;
use crate::config::models::{AppConfig, SourceKind, SourceSettings};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pdbsplit::{
    core::io::{completion_log::CsvCompletionLog, tables::CsvTableSink},
    core::sequence::{
        native::AtomRecordSource, pdb_tools::PdbToolsSource, traits::SequenceSource,
    },
    engine::progress::ProgressReporter,
    workflows::{self, batch::BatchReport},
};
use tracing::{debug, info, warn};

fn build_source(settings: &SourceSettings) -> Box<dyn SequenceSource + Sync> {
    match settings.kind {
        SourceKind::Native => Box::new(AtomRecordSource::new()),
        SourceKind::PdbTools => Box::new(PdbToolsSource::new(
            settings.tofasta_command.clone(),
            settings.selres_command.clone(),
        )),
    }
}

pub async fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let config = build_config(&args)?;
    debug!(
        workers = config.batch.workers,
        extension = %config.batch.extension,
        source = ?config.source.kind,
        "Resolved batch configuration."
    );

    let log = CsvCompletionLog::new(&config.output.completion_log);
    let mut sink = CsvTableSink::new(
        &config.output.structured_table,
        &config.output.unstructured_table,
        config.output.append,
    );
    let source = build_source(&config.source);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scanning {} for .{} files...",
        config.input_dir.display(),
        config.batch.extension
    );
    info!("Invoking the batch segmentation workflow...");

    let report = tokio::task::block_in_place(|| {
        workflows::batch::run(
            &config.input_dir,
            &log,
            &mut sink,
            source.as_ref(),
            &config.batch,
            &reporter,
        )
    })?;

    finish(report, &config)
}

fn finish(report: BatchReport, config: &AppConfig) -> Result<()> {
    if report.is_noop() {
        println!(
            "All PDB files have been processed. ({} found, {} already done)",
            report.summary.discovered, report.summary.skipped
        );
        return Ok(());
    }

    print_summary(&report);

    if let Some(e) = report.output_error {
        return Err(CliError::BatchOutput(e));
    }

    let output = &config.output;
    println!(
        "✓ {} structured region(s) written to: {}",
        report.result.structured.len(),
        output.structured_table.display()
    );
    println!(
        "✓ {} unstructured record(s) written to: {}",
        report.result.unstructured.len(),
        output.unstructured_table.display()
    );

    match report.log_error {
        Some(e) => Err(CliError::LogPersistence(e)),
        None => Ok(()),
    }
}

fn print_summary(report: &BatchReport) {
    let summary = &report.summary;
    println!(
        "Processed {} file(s): {} succeeded, {} failed, {} skipped as already done.",
        summary.submitted, summary.succeeded, summary.failed, summary.skipped
    );
    if !report.failures.is_empty() {
        let mut ids: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.file_id.as_str())
            .collect();
        ids.sort_unstable();
        warn!(failed = ids.len(), "Some files failed and remain pending.");
        println!("Failed (will be retried next run): {}", ids.join(", "));
    }
}
