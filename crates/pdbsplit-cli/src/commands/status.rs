use crate::cli::StatusArgs;
use crate::config::builder::build_status_config;
use crate::config::models::StatusConfig;
use crate::error::{CliError, Result};
use pdbsplit::core::io::completion_log::{CompletionLog, CsvCompletionLog};
use pdbsplit::core::io::discovery::discover_inputs;
use pdbsplit::engine::error::BatchError;
use pdbsplit::workflows::batch::pending_inputs;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub discovered: usize,
    pub completed: usize,
    /// Ids recorded in the log that no longer have a matching input file.
    pub orphaned: usize,
    pub pending: Vec<String>,
}

pub fn collect_status(config: &StatusConfig) -> Result<StatusReport> {
    let completed = CsvCompletionLog::new(&config.completion_log).load();
    let discovered = discover_inputs(&config.input_dir, &config.extension).map_err(|e| {
        CliError::Batch(BatchError::InputDirectory {
            path: config.input_dir.to_string_lossy().to_string(),
            source: e,
        })
    })?;

    let discovered_count = discovered.len();
    let orphaned = completed
        .iter()
        .filter(|id| !discovered.iter().any(|input| &input.id == *id))
        .count();
    let (pending, skipped) = pending_inputs(discovered, &completed);

    Ok(StatusReport {
        discovered: discovered_count,
        completed: skipped,
        orphaned,
        pending: pending.into_iter().map(|input| input.id).collect(),
    })
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let config = build_status_config(&args)?;
    info!(
        input = %config.input_dir.display(),
        log = %config.completion_log.display(),
        "Collecting batch status."
    );
    let report = collect_status(&config)?;

    println!(
        "{} .{} file(s) in {}: {} completed, {} pending.",
        report.discovered,
        config.extension,
        config.input_dir.display(),
        report.completed,
        report.pending.len()
    );
    if report.orphaned > 0 {
        println!(
            "{} id(s) in {} have no matching input file.",
            report.orphaned,
            config.completion_log.display()
        );
    }
    if args.list {
        for id in &report.pending {
            println!("  {}", id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn counts_completed_pending_and_orphaned_ids() {
        let root = tempdir().unwrap();
        let input_dir = root.path().join("structures");
        fs::create_dir(&input_dir).unwrap();
        for name in ["1abc.pdb", "2def.PDB", "3ghi.pdb", "notes.txt"] {
            fs::write(input_dir.join(name), "END\n").unwrap();
        }
        let log_path = root.path().join("log.csv");
        fs::write(&log_path, "PDB_ID\n1abc\n0old\n").unwrap();

        let report = collect_status(&StatusConfig {
            input_dir,
            extension: "pdb".to_string(),
            completion_log: log_path,
        })
        .unwrap();

        assert_eq!(report.discovered, 3);
        assert_eq!(report.completed, 1);
        assert_eq!(report.orphaned, 1);
        assert_eq!(report.pending, vec!["2def".to_string(), "3ghi".to_string()]);
    }

    #[test]
    fn missing_log_means_everything_is_pending() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("1abc.pdb"), "END\n").unwrap();

        let report = collect_status(&StatusConfig {
            input_dir: root.path().to_path_buf(),
            extension: "pdb".to_string(),
            completion_log: root.path().join("absent.csv"),
        })
        .unwrap();

        assert_eq!(report.completed, 0);
        assert_eq!(report.pending, vec!["1abc".to_string()]);
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let root = tempdir().unwrap();
        let result = collect_status(&StatusConfig {
            input_dir: root.path().join("nope"),
            extension: "pdb".to_string(),
            completion_log: root.path().join("log.csv"),
        });
        assert!(matches!(result, Err(CliError::Batch(_))));
    }
}
