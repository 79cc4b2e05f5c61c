use super::traits::{SequenceSource, SequenceSourceError};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::{debug, warn};

pub const DEFAULT_TOFASTA_COMMAND: &str = "pdb_tofasta";
pub const DEFAULT_SELRES_COMMAND: &str = "pdb_selres";

/// Extracts sequences by running the `pdb-tools` converters as child processes.
///
/// A sub-range is cut out with `pdb_selres` into a scratch `.pdb` file, which is then converted
/// with `pdb_tofasta`. The scratch file is removed before returning.
#[derive(Debug, Clone)]
pub struct PdbToolsSource {
    tofasta_command: String,
    selres_command: String,
}

impl Default for PdbToolsSource {
    fn default() -> Self {
        Self::new(DEFAULT_TOFASTA_COMMAND, DEFAULT_SELRES_COMMAND)
    }
}

/// Concatenates the sequence lines of FASTA text, dropping `>` headers.
pub fn fasta_body(fasta: &str) -> String {
    fasta
        .lines()
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect()
}

impl PdbToolsSource {
    pub fn new(tofasta_command: impl Into<String>, selres_command: impl Into<String>) -> Self {
        Self {
            tofasta_command: tofasta_command.into(),
            selres_command: selres_command.into(),
        }
    }

    fn run_checked(command: &mut Command, what: &str, path: &Path) -> Option<Output> {
        match command.output() {
            Ok(output) if output.status.success() => Some(output),
            Ok(output) => {
                warn!(
                    "Error generating {} for {}: exit status {}: {}",
                    what,
                    path.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                None
            }
            Err(e) => {
                warn!("Failed to launch converter for {}: {}", path.display(), e);
                None
            }
        }
    }

    fn tofasta(&self, path: &Path) -> String {
        let mut command = Command::new(&self.tofasta_command);
        command.arg(path).stdin(Stdio::null());
        Self::run_checked(&mut command, "FASTA sequence", path)
            .map(|output| fasta_body(&String::from_utf8_lossy(&output.stdout)))
            .unwrap_or_default()
    }
}

impl SequenceSource for PdbToolsSource {
    fn full_sequence(&self, path: &Path) -> Result<String, SequenceSourceError> {
        Ok(self.tofasta(path))
    }

    fn sub_sequence(
        &self,
        path: &Path,
        start: isize,
        end: isize,
    ) -> Result<String, SequenceSourceError> {
        let scratch = tempfile::Builder::new()
            .prefix("pdbsplit-")
            .suffix(".pdb")
            .tempfile()
            .map_err(|e| SequenceSourceError::TempResource {
                operation: "create",
                source: e,
            })?;
        let scratch_out = scratch
            .reopen()
            .map_err(|e| SequenceSourceError::TempResource {
                operation: "open",
                source: e,
            })?;

        let mut select = Command::new(&self.selres_command);
        select
            .arg(format!("-{}:{}", start, end))
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::from(scratch_out));
        let sequence = match select.status() {
            Ok(status) if status.success() => {
                debug!(
                    "Selected residues {}-{} of {} into {}",
                    start,
                    end,
                    path.display(),
                    scratch.path().display()
                );
                self.tofasta(scratch.path())
            }
            Ok(status) => {
                warn!(
                    "Residue selection {}-{} failed for {}: exit status {}",
                    start,
                    end,
                    path.display(),
                    status
                );
                String::new()
            }
            Err(e) => {
                warn!("Failed to launch residue selection for {}: {}", path.display(), e);
                String::new()
            }
        };

        scratch
            .close()
            .map_err(|e| SequenceSourceError::TempResource {
                operation: "remove",
                source: e,
            })?;
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fasta_body_drops_headers_and_joins_lines() {
        let fasta = ">PDB|A\nMKVLA\nGHIKL\n>PDB|B\nWW\n";
        assert_eq!(fasta_body(fasta), "MKVLAGHIKLWW");
    }

    #[test]
    fn fasta_body_of_empty_output_is_empty() {
        assert_eq!(fasta_body(""), "");
    }

    #[test]
    fn missing_converter_degrades_to_empty_sequence() {
        let source = PdbToolsSource::new(
            "pdbsplit-test-no-such-tofasta",
            "pdbsplit-test-no-such-selres",
        );
        let path = Path::new("does-not-matter.pdb");

        assert_eq!(source.full_sequence(path).unwrap(), "");
        assert_eq!(source.sub_sequence(path, 1, 5).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn converters_are_invoked_with_selection_argument() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let tofasta = dir.path().join("fake_tofasta");
        let selres = dir.path().join("fake_selres");
        // The fake selector echoes its range argument, the fake converter wraps its input.
        fs::write(&selres, "#!/bin/sh\necho \"$1\"\n").unwrap();
        fs::write(&tofasta, "#!/bin/sh\necho '>header'\ncat \"$1\"\n").unwrap();
        for script in [&tofasta, &selres] {
            fs::set_permissions(script, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let input = dir.path().join("1abc.pdb");
        fs::write(&input, "MKV\nLA\n").unwrap();

        let source = PdbToolsSource::new(
            tofasta.to_string_lossy().to_string(),
            selres.to_string_lossy().to_string(),
        );

        assert_eq!(source.full_sequence(&input).unwrap(), "MKVLA");
        assert_eq!(source.sub_sequence(&input, 2, 4).unwrap(), "-2:4");
    }
}
