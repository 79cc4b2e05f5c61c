use crate::core::models::structure::{RangeError, ResidueRange, StructureKind};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed record on line {line}: {kind}")]
    Malformed {
        line: usize,
        kind: RecordParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseErrorKind {
    #[error("Line is not a HELIX or SHEET record")]
    NotAnnotation,
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt {
        columns: &'static str,
        value: String,
    },
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Column layout of the residue numbers in one annotation record type.
struct SeqNumColumns {
    start: (usize, usize, &'static str),
    end: (usize, usize, &'static str),
}

const HELIX_COLUMNS: SeqNumColumns = SeqNumColumns {
    start: (21, 25, "22-25"),
    end: (33, 37, "34-37"),
};

const SHEET_COLUMNS: SeqNumColumns = SeqNumColumns {
    start: (22, 26, "23-26"),
    end: (33, 37, "34-37"),
};

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

fn parse_seq_num(
    line: &str,
    (start, end, columns): (usize, usize, &'static str),
) -> Result<isize, RecordParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(RecordParseErrorKind::MissingRequiredField { columns });
    }
    value.parse().map_err(|_| RecordParseErrorKind::InvalidInt {
        columns,
        value: value.to_string(),
    })
}

/// Parses one HELIX or SHEET record into a [`ResidueRange`].
///
/// Residue numbers are read from the fixed PDB columns of the record type: `initSeqNum` and
/// `endSeqNum`. The range is not checked against any sequence.
pub fn parse_annotation(line: &str) -> Result<ResidueRange, RecordParseErrorKind> {
    let kind = StructureKind::from_record_line(line).ok_or(RecordParseErrorKind::NotAnnotation)?;
    let columns = match kind {
        StructureKind::Helix => &HELIX_COLUMNS,
        StructureKind::Sheet => &SHEET_COLUMNS,
    };
    let start = parse_seq_num(line, columns.start)?;
    let end = parse_seq_num(line, columns.end)?;
    Ok(ResidueRange::new(kind, start, end)?)
}

/// Reads every annotation range of a structure file, in encounter order.
///
/// Lines that are not HELIX/SHEET records are skipped. The first malformed annotation aborts
/// the read with its 1-based line number.
pub fn read_ranges(reader: &mut impl BufRead) -> Result<Vec<ResidueRange>, RecordError> {
    let mut ranges = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        if StructureKind::from_record_line(&line).is_none() {
            continue;
        }
        let range = parse_annotation(&line).map_err(|kind| RecordError::Malformed {
            line: line_num + 1,
            kind,
        })?;
        ranges.push(range);
    }
    Ok(ranges)
}

pub fn read_ranges_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ResidueRange>, RecordError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_ranges(&mut reader)
}
