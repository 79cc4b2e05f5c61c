use crate::core::io::discovery::InputFile;
use crate::core::io::records::{RecordError, read_ranges_from_path};
use crate::core::models::sequence::FullSequence;
use crate::core::segmentation::{Segmentation, segment};
use crate::core::sequence::traits::SequenceSource;
use crate::engine::config::BatchConfig;
use crate::engine::error::{EngineError, FileFailure};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub type FileOutcome = Result<Segmentation, FileFailure>;

/// Processes one structure file end to end: full sequence, annotation ranges, segmentation.
pub fn process_file<S>(
    source: &S,
    input: &InputFile,
    config: &BatchConfig,
) -> Result<Segmentation, EngineError>
where
    S: SequenceSource + ?Sized,
{
    let residues = source.full_sequence(&input.path)?;
    if residues.is_empty() {
        warn!(
            file = %input.id,
            "Full sequence is empty; unstructured segments will be empty."
        );
    }
    let sequence = FullSequence::new(&input.id, residues);

    let ranges = read_ranges_from_path(&input.path).map_err(|e| match e {
        RecordError::Io(source) => EngineError::Read(source),
        RecordError::Malformed { line, kind } => EngineError::MalformedRecord { line, kind },
    })?;
    if ranges.is_empty() && config.require_annotations {
        return Err(EngineError::NoAnnotations);
    }
    debug!(
        file = %input.id,
        ranges = ranges.len(),
        residues = sequence.len(),
        "Segmenting file."
    );

    Ok(segment(source, &input.path, &sequence, &ranges)?)
}

/// Runs [`process_file`] behind the worker boundary: every error, including a panic, becomes a
/// [`FileFailure`] tagged with the file.
pub fn run_worker<S>(source: &S, input: &InputFile, config: &BatchConfig) -> FileOutcome
where
    S: SequenceSource + ?Sized,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| process_file(source, input, config)))
        .unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            Err(EngineError::WorkerPanic(message))
        });

    result.map_err(|error| FileFailure {
        file_id: input.id.clone(),
        path: input.path.clone(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::traits::SequenceSourceError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    struct FixedSource(&'static str);

    impl SequenceSource for FixedSource {
        fn full_sequence(&self, _path: &Path) -> Result<String, SequenceSourceError> {
            Ok(self.0.to_string())
        }

        fn sub_sequence(
            &self,
            _path: &Path,
            start: isize,
            end: isize,
        ) -> Result<String, SequenceSourceError> {
            Ok(FullSequence::new("", self.0).span(start, end).to_string())
        }
    }

    struct BrokenScratchSource;

    impl SequenceSource for BrokenScratchSource {
        fn full_sequence(&self, _path: &Path) -> Result<String, SequenceSourceError> {
            Ok("ABCDEFGHIJ".to_string())
        }

        fn sub_sequence(
            &self,
            _path: &Path,
            _start: isize,
            _end: isize,
        ) -> Result<String, SequenceSourceError> {
            Err(SequenceSourceError::TempResource {
                operation: "create",
                source: std::io::Error::other("disk full"),
            })
        }
    }

    struct PanickingSource;

    impl SequenceSource for PanickingSource {
        fn full_sequence(&self, _path: &Path) -> Result<String, SequenceSourceError> {
            panic!("converter exploded")
        }

        fn sub_sequence(
            &self,
            _path: &Path,
            _start: isize,
            _end: isize,
        ) -> Result<String, SequenceSourceError> {
            unreachable!()
        }
    }

    const HELIX_LINE: &str = "HELIX    1   1 ALA A    2  GLY A    4  1";

    fn write_input(dir: &Path, name: &str, content: &str) -> InputFile {
        let path = dir.join(format!("{}.pdb", name));
        fs::write(&path, content).unwrap();
        InputFile::from_path(path).unwrap()
    }

    #[test]
    fn process_file_segments_annotated_file() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "1abc", &format!("{}\nEND\n", HELIX_LINE));

        let result = process_file(&FixedSource("ABCDEFGHIJ"), &input, &BatchConfig::default())
            .unwrap();

        assert_eq!(result.structured.len(), 1);
        assert_eq!(result.structured[0].sequence, "BCD");
        assert_eq!(result.unstructured.file_id, "1abc");
        assert_eq!(result.unstructured.joined(), "A|EFGHIJ");
    }

    #[test]
    fn unannotated_file_succeeds_by_default() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "2xyz", "HEADER    NOTHING\nEND\n");

        let result =
            process_file(&FixedSource("MKV"), &input, &BatchConfig::default()).unwrap();

        assert!(result.structured.is_empty());
        assert_eq!(result.unstructured.joined(), "MKV");
    }

    #[test]
    fn unannotated_file_fails_when_annotations_are_required() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "2xyz", "HEADER    NOTHING\nEND\n");
        let config = BatchConfig {
            require_annotations: true,
            ..BatchConfig::default()
        };

        let result = process_file(&FixedSource("MKV"), &input, &config);

        assert!(matches!(result, Err(EngineError::NoAnnotations)));
    }

    #[test]
    fn malformed_record_is_reported_with_line() {
        let dir = tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "bad",
            "HEADER    BAD\nHELIX    1   1 ALA A    9  GLY A    4  1\n",
        );

        let outcome = run_worker(&FixedSource("ABCDEFGHIJ"), &input, &BatchConfig::default());

        let failure = outcome.unwrap_err();
        assert_eq!(failure.file_id, "bad");
        assert!(matches!(
            failure.error,
            EngineError::MalformedRecord { line: 2, .. }
        ));
    }

    #[test]
    fn scratch_failure_fails_the_file() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "1abc", HELIX_LINE);

        let outcome = run_worker(&BrokenScratchSource, &input, &BatchConfig::default());

        assert!(matches!(
            outcome.unwrap_err().error,
            EngineError::TempResource(_)
        ));
    }

    #[test]
    fn panic_is_contained_at_worker_boundary() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), "boom", HELIX_LINE);

        let outcome = run_worker(&PanickingSource, &input, &BatchConfig::default());

        match outcome.unwrap_err().error {
            EngineError::WorkerPanic(message) => assert!(message.contains("converter exploded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
