use super::structure::StructureKind;

/// Reserved separator between unstructured segments in the joined output string.
///
/// It never occurs in a residue alphabet.
pub const SEGMENT_DELIMITER: &str = "|";

/// The sequence of one annotated secondary-structure range of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRegion {
    pub file_id: String,
    pub kind: StructureKind,
    pub start: isize,
    pub end: isize,
    pub sequence: String,
}

/// The residue stretches of a file that no annotated range covers, in ascending range order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstructuredResult {
    pub file_id: String,
    pub segments: Vec<String>,
}

impl UnstructuredResult {
    /// Joins the segments with [`SEGMENT_DELIMITER`]. Empty segments are kept.
    pub fn joined(&self) -> String {
        self.segments.join(SEGMENT_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_keeps_empty_segments() {
        let result = UnstructuredResult {
            file_id: "1ABC".into(),
            segments: vec!["".into(), "E".into(), "".into()],
        };
        assert_eq!(result.joined(), "|E|");
    }

    #[test]
    fn joined_single_segment_has_no_delimiter() {
        let result = UnstructuredResult {
            file_id: "1ABC".into(),
            segments: vec!["ABCDEFGHIJ".into()],
        };
        assert_eq!(result.joined(), "ABCDEFGHIJ");
    }
}
