//! CSV serialization of the two output tables of a batch run.

use crate::core::models::region::{StructuredRegion, UnstructuredResult};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STRUCTURED_HEADER: [&str; 5] = ["PDB_ID", "Type", "Start", "End", "FASTA"];
pub const UNSTRUCTURED_HEADER: [&str; 2] = ["PDB_ID", "Unstructured_FASTA"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct StructuredRow<'a> {
    #[serde(rename = "PDB_ID")]
    file_id: &'a str,
    #[serde(rename = "Type")]
    kind: char,
    #[serde(rename = "Start")]
    start: isize,
    #[serde(rename = "End")]
    end: isize,
    #[serde(rename = "FASTA")]
    sequence: &'a str,
}

#[derive(Serialize)]
struct UnstructuredRow<'a> {
    #[serde(rename = "PDB_ID")]
    file_id: &'a str,
    #[serde(rename = "Unstructured_FASTA")]
    unstructured: String,
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer)
}

pub fn write_structured<W: Write>(
    writer: W,
    regions: &[StructuredRegion],
    include_header: bool,
) -> Result<(), TableError> {
    let mut csv = csv_writer(writer);
    if include_header {
        csv.write_record(STRUCTURED_HEADER)?;
    }
    for region in regions {
        csv.serialize(StructuredRow {
            file_id: &region.file_id,
            kind: region.kind.code(),
            start: region.start,
            end: region.end,
            sequence: &region.sequence,
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_unstructured<W: Write>(
    writer: W,
    results: &[UnstructuredResult],
    include_header: bool,
) -> Result<(), TableError> {
    let mut csv = csv_writer(writer);
    if include_header {
        csv.write_record(UNSTRUCTURED_HEADER)?;
    }
    for result in results {
        csv.serialize(UnstructuredRow {
            file_id: &result.file_id,
            unstructured: result.joined(),
        })?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Opens `path` for a table write. In append mode the header is only wanted when the file is
/// new or empty.
fn open_table(path: &Path, append: bool) -> Result<(File, bool), TableError> {
    let io_err = |e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    if append {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        let is_empty = file.metadata().map_err(io_err)?.len() == 0;
        Ok((file, is_empty))
    } else {
        let file = File::create(path).map_err(io_err)?;
        Ok((file, true))
    }
}

fn sync(file: &File, path: &Path) -> Result<(), TableError> {
    file.sync_all().map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Destination for the rows of a batch run, written in chunks as files complete.
///
/// The batch driver hands every chunk to the sink before it records the chunk's files in the
/// completion log, so a successful `write_rows` must leave the rows durable.
pub trait TableSink {
    fn write_rows(
        &mut self,
        structured: &[StructuredRegion],
        unstructured: &[UnstructuredResult],
    ) -> Result<(), TableError>;
}

/// Writes the structured and unstructured tables as two CSV files.
///
/// Without `append`, the first chunk replaces whatever the files held before; every later
/// chunk of the same sink is appended below it.
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    structured_path: PathBuf,
    unstructured_path: PathBuf,
    append: bool,
    started: bool,
}

impl CsvTableSink {
    pub fn new(
        structured_path: impl Into<PathBuf>,
        unstructured_path: impl Into<PathBuf>,
        append: bool,
    ) -> Self {
        Self {
            structured_path: structured_path.into(),
            unstructured_path: unstructured_path.into(),
            append,
            started: false,
        }
    }
}

impl TableSink for CsvTableSink {
    fn write_rows(
        &mut self,
        structured: &[StructuredRegion],
        unstructured: &[UnstructuredResult],
    ) -> Result<(), TableError> {
        let append = self.append || self.started;

        let (file, include_header) = open_table(&self.structured_path, append)?;
        write_structured(BufWriter::new(&file), structured, include_header)?;
        sync(&file, &self.structured_path)?;

        let (file, include_header) = open_table(&self.unstructured_path, append)?;
        write_unstructured(BufWriter::new(&file), unstructured, include_header)?;
        sync(&file, &self.unstructured_path)?;

        self.started = true;
        Ok(())
    }
}

/// Keeps every written row in memory. Used by callers that only want the [`BatchReport`]
/// and by tests.
///
/// [`BatchReport`]: crate::workflows::batch::BatchReport
#[derive(Debug, Default)]
pub struct MemoryTableSink {
    structured: Vec<StructuredRegion>,
    unstructured: Vec<UnstructuredResult>,
    writes: usize,
}

impl MemoryTableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structured(&self) -> &[StructuredRegion] {
        &self.structured
    }

    pub fn unstructured(&self) -> &[UnstructuredResult] {
        &self.unstructured
    }

    /// Number of chunks handed to [`write_rows`](TableSink::write_rows).
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TableSink for MemoryTableSink {
    fn write_rows(
        &mut self,
        structured: &[StructuredRegion],
        unstructured: &[UnstructuredResult],
    ) -> Result<(), TableError> {
        self.structured.extend_from_slice(structured);
        self.unstructured.extend_from_slice(unstructured);
        self.writes += 1;
        Ok(())
    }
}
