use crate::cli::FastaArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pdbsplit::core::io::fasta::write_fasta_table;
use pdbsplit::engine::config::BatchConfigBuilder;
use pdbsplit::engine::progress::ProgressReporter;
use pdbsplit::workflows;
use std::path::PathBuf;
use tracing::{info, warn};

pub async fn run(args: FastaArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let batch = BatchConfigBuilder::new()
        .workers(args.workers.unwrap_or(defaults.workers))
        .extension(args.extension.unwrap_or(defaults.fasta_extension))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&defaults.fasta_table));

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the FASTA workflow...");
    let report = tokio::task::block_in_place(|| {
        workflows::fasta::run(&args.input, &batch.extension, batch.workers, &reporter)
    })?;

    write_fasta_table(&output, &report.records).map_err(CliError::Output)?;

    println!(
        "✓ {} record(s) from {} file(s) written to: {}",
        report.records.len(),
        report.files_read,
        output.display()
    );
    if !report.failures.is_empty() {
        warn!(failed = report.failures.len(), "Some FASTA files could not be read.");
        for failure in &report.failures {
            println!("  ✗ {}: {}", failure.path.display(), failure.error);
        }
    }
    Ok(())
}
