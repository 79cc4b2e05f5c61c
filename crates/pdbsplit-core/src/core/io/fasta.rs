//! Reading FASTA files into flat `(id, description, sequence)` records.

use super::tables::TableError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

pub const FASTA_HEADER: [&str; 3] = ["id", "description", "sequence"];

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence data on line {line} appears before any '>' header")]
    SequenceBeforeHeader { line: usize },
}

/// One FASTA entry, tagged with the name of the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastaRecord {
    #[serde(rename = "id")]
    pub file_name: String,
    /// The full header line without the leading `>`.
    pub description: String,
    pub sequence: String,
}

/// Parses every entry of a FASTA stream as `(description, sequence)` pairs.
///
/// Sequence lines are concatenated with surrounding whitespace removed. Blank lines are
/// ignored anywhere; any other text before the first header is an error.
pub fn read_fasta(reader: &mut impl BufRead) -> Result<Vec<(String, String)>, FastaError> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            entries.push((header.trim().to_string(), String::new()));
        } else if !line.is_empty() {
            let Some((_, sequence)) = entries.last_mut() else {
                return Err(FastaError::SequenceBeforeHeader { line: line_num + 1 });
            };
            sequence.push_str(line);
        }
    }
    Ok(entries)
}

/// Reads all records of the FASTA file at `path`, using its file name as the record id.
pub fn read_fasta_file(path: &Path) -> Result<Vec<FastaRecord>, FastaError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut reader = BufReader::new(File::open(path)?);
    Ok(read_fasta(&mut reader)?
        .into_iter()
        .map(|(description, sequence)| FastaRecord {
            file_name: file_name.clone(),
            description,
            sequence,
        })
        .collect())
}

pub fn write_fasta_records<W: Write>(writer: W, records: &[FastaRecord]) -> Result<(), TableError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(FASTA_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_fasta_table(path: &Path, records: &[FastaRecord]) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_fasta_records(io::BufWriter::new(file), records)
}
