use thiserror::Error;

/// The kind of secondary structure an annotation record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Helix,
    Sheet,
}

impl StructureKind {
    const ALL: [StructureKind; 2] = [StructureKind::Helix, StructureKind::Sheet];

    /// Single-letter code used in the output tables (`H` for helix, `B` for sheet strand).
    pub fn code(self) -> char {
        match self {
            StructureKind::Helix => 'H',
            StructureKind::Sheet => 'B',
        }
    }

    /// The PDB record tag that introduces this kind of annotation.
    pub fn record_tag(self) -> &'static str {
        match self {
            StructureKind::Helix => "HELIX",
            StructureKind::Sheet => "SHEET",
        }
    }

    /// Returns the kind whose record tag starts `line`, if any.
    pub fn from_record_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| line.starts_with(kind.record_tag()))
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RangeError {
    #[error("Range start {start} is greater than range end {end}")]
    Inverted { start: isize, end: isize },
}

/// A 1-based, inclusive residue range tagged with its secondary-structure kind.
///
/// The `start <= end` invariant is checked on construction, so every value of this type
/// describes a non-empty span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueRange {
    kind: StructureKind,
    start: isize,
    end: isize,
}

impl ResidueRange {
    pub fn new(kind: StructureKind, start: isize, end: isize) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { kind, start, end })
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn start(&self) -> isize {
        self.start
    }

    pub fn end(&self) -> isize {
        self.end
    }
}
