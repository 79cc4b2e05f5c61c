//! Splits a file's sequence into its annotated secondary-structure regions and the
//! unstructured stretches between them.
//!
//! Ranges are ordered by their start residue only, with ties kept in encounter order. Overlapping
//! ranges are neither merged nor rejected: the gap between two overlapping ranges is the empty
//! string, and `prev_end` always takes the end of the range just visited, even when that moves
//! it backwards. Every segmentation therefore has exactly one more segment than it has ranges.

use crate::core::models::region::{StructuredRegion, UnstructuredResult};
use crate::core::models::sequence::FullSequence;
use crate::core::models::structure::ResidueRange;
use crate::core::sequence::traits::{SequenceSource, SequenceSourceError};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub structured: Vec<StructuredRegion>,
    pub unstructured: UnstructuredResult,
}

/// Computes the unstructured gap segments of `sequence` around `ranges`.
///
/// `ranges` may be unsorted and may overlap. The result always has `ranges.len() + 1` entries,
/// some of which may be empty.
pub fn unstructured_segments(sequence: &FullSequence, ranges: &[ResidueRange]) -> Vec<String> {
    let mut ordered: Vec<&ResidueRange> = ranges.iter().collect();
    // Stable: equal starts keep their encounter order.
    ordered.sort_by_key(|range| range.start());

    let mut segments = Vec::with_capacity(ranges.len() + 1);
    let mut prev_end: isize = 0;
    for range in ordered {
        segments.push(sequence.span(prev_end + 1, range.start() - 1).to_string());
        prev_end = range.end();
    }
    segments.push(
        sequence
            .span(prev_end + 1, sequence.len() as isize)
            .to_string(),
    );
    segments
}

/// Builds the structured regions and the unstructured complement of one file.
///
/// Each region's sequence is requested from `source` independently, in encounter order.
pub fn segment<S>(
    source: &S,
    path: &Path,
    sequence: &FullSequence,
    ranges: &[ResidueRange],
) -> Result<Segmentation, SequenceSourceError>
where
    S: SequenceSource + ?Sized,
{
    let structured = ranges
        .iter()
        .map(|range| {
            Ok(StructuredRegion {
                file_id: sequence.file_id().to_string(),
                kind: range.kind(),
                start: range.start(),
                end: range.end(),
                sequence: source.sub_sequence(path, range.start(), range.end())?,
            })
        })
        .collect::<Result<Vec<_>, SequenceSourceError>>()?;

    Ok(Segmentation {
        structured,
        unstructured: UnstructuredResult {
            file_id: sequence.file_id().to_string(),
            segments: unstructured_segments(sequence, ranges),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureKind;

    /// Serves sub-sequences by slicing a fixed string, like a perfectly numbered structure.
    struct SliceSource(&'static str);

    impl SequenceSource for SliceSource {
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

    fn helix(start: isize, end: isize) -> ResidueRange {
        ResidueRange::new(StructureKind::Helix, start, end).unwrap()
    }

    fn sheet(start: isize, end: isize) -> ResidueRange {
        ResidueRange::new(StructureKind::Sheet, start, end).unwrap()
    }

    fn sequence() -> FullSequence {
        FullSequence::new("1ABC", "ABCDEFGHIJ")
    }

    fn run(ranges: &[ResidueRange]) -> Segmentation {
        segment(&SliceSource("ABCDEFGHIJ"), Path::new("1abc.pdb"), &sequence(), ranges).unwrap()
    }

    #[test]
    fn two_disjoint_ranges_produce_three_segments() {
        let result = run(&[helix(2, 4), sheet(6, 8)]);

        let structured: Vec<_> = result.structured.iter().map(|r| r.sequence.as_str()).collect();
        assert_eq!(structured, vec!["BCD", "FGH"]);
        assert_eq!(result.unstructured.segments, vec!["A", "E", "IJ"]);
        assert_eq!(result.unstructured.joined(), "A|E|IJ");
    }

    #[test]
    fn input_order_does_not_change_unstructured_result() {
        let sorted = run(&[helix(2, 4), sheet(6, 8)]);
        let reversed = run(&[sheet(6, 8), helix(2, 4)]);

        assert_eq!(sorted.unstructured, reversed.unstructured);
    }

    #[test]
    fn structured_regions_keep_encounter_order() {
        let result = run(&[sheet(6, 8), helix(2, 4)]);

        assert_eq!(result.structured[0].kind, StructureKind::Sheet);
        assert_eq!(result.structured[0].sequence, "FGH");
        assert_eq!(result.structured[1].kind, StructureKind::Helix);
        assert_eq!(result.structured[1].file_id, "1ABC");
    }

    #[test]
    fn zero_ranges_leave_full_sequence() {
        let result = run(&[]);

        assert!(result.structured.is_empty());
        assert_eq!(result.unstructured.segments.len(), 1);
        assert_eq!(result.unstructured.joined(), "ABCDEFGHIJ");
    }

    #[test]
    fn range_spanning_whole_sequence_leaves_two_empty_segments() {
        let result = run(&[helix(1, 10)]);

        assert_eq!(result.structured[0].sequence, "ABCDEFGHIJ");
        assert_eq!(result.unstructured.segments, vec!["", ""]);
        assert_eq!(result.unstructured.joined(), "|");
    }

    #[test]
    fn adjacent_ranges_produce_empty_gap() {
        let segments = unstructured_segments(&sequence(), &[helix(1, 3), sheet(4, 6)]);
        assert_eq!(segments, vec!["", "", "GHIJ"]);
    }

    #[test]
    fn segment_count_is_always_range_count_plus_one() {
        let cases: Vec<Vec<ResidueRange>> = vec![
            vec![],
            vec![helix(5, 5)],
            vec![helix(1, 2), helix(1, 2)],
            vec![helix(3, 9), sheet(2, 4), helix(8, 12)],
            vec![sheet(11, 15), sheet(20, 30)],
        ];
        for ranges in cases {
            let segments = unstructured_segments(&sequence(), &ranges);
            assert_eq!(segments.len(), ranges.len() + 1, "ranges: {:?}", ranges);
        }
    }

    #[test]
    fn overlapping_ranges_are_not_merged() {
        // [2,6] and [4,8] overlap; the gap between them is empty and the walk continues
        // from the end of the later-starting range.
        let segments = unstructured_segments(&sequence(), &[sheet(4, 8), helix(2, 6)]);
        assert_eq!(segments, vec!["A", "", "IJ"]);
    }

    #[test]
    fn contained_range_moves_previous_end_backwards() {
        // [2,9] contains [4,5]; after visiting [4,5] the trailing segment restarts at 6.
        let segments = unstructured_segments(&sequence(), &[helix(2, 9), sheet(4, 5)]);
        assert_eq!(segments, vec!["A", "", "FGHIJ"]);
    }

    #[test]
    fn equal_starts_keep_encounter_order() {
        // Sorting by start only: [3,7] stays ahead of [3,4], so the trailing gap starts at 5.
        let segments = unstructured_segments(&sequence(), &[helix(3, 7), sheet(3, 4)]);
        assert_eq!(segments, vec!["AB", "", "EFGHIJ"]);
    }

    #[test]
    fn ranges_beyond_sequence_are_clamped() {
        let segments = unstructured_segments(&sequence(), &[helix(9, 14)]);
        assert_eq!(segments, vec!["ABCDEFGH", ""]);
    }
}
