/// The complete, ordered residue sequence of one input file.
///
/// Residues are stored as one-letter codes. Positions at the API boundary are 1-based residue
/// numbers; slicing is 0-based internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSequence {
    file_id: String,
    residues: String,
}

impl FullSequence {
    pub fn new(file_id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            residues: residues.into(),
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn residues(&self) -> &str {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Returns residues `first..=last` (1-based, inclusive).
    ///
    /// Both ends are clamped to the sequence, and an empty or inverted interval yields `""`.
    pub fn span(&self, first: isize, last: isize) -> &str {
        let len = self.residues.len() as isize;
        let lo = (first - 1).clamp(0, len) as usize;
        let hi = last.clamp(0, len) as usize;
        if hi <= lo {
            return "";
        }
        self.residues.get(lo..hi).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> FullSequence {
        FullSequence::new("1ABC", "ABCDEFGHIJ")
    }

    #[test]
    fn span_uses_one_based_inclusive_positions() {
        let seq = sequence();
        assert_eq!(seq.span(1, 1), "A");
        assert_eq!(seq.span(2, 4), "BCD");
        assert_eq!(seq.span(10, 10), "J");
    }

    #[test]
    fn span_returns_empty_for_inverted_interval() {
        assert_eq!(sequence().span(5, 4), "");
        assert_eq!(sequence().span(7, 2), "");
    }

    #[test]
    fn span_clamps_to_sequence_bounds() {
        let seq = sequence();
        assert_eq!(seq.span(9, 25), "IJ");
        assert_eq!(seq.span(-3, 2), "AB");
        assert_eq!(seq.span(11, 20), "");
    }

    #[test]
    fn empty_sequence_has_no_spans() {
        let seq = FullSequence::new("EMPTY", "");
        assert!(seq.is_empty());
        assert_eq!(seq.span(1, 5), "");
    }
}
