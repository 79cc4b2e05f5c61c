//! Input/output for structure files and the artifacts of a batch run.
//!
//! Annotation records are parsed in [`records`], input directories are scanned in
//! [`discovery`], run state is persisted through [`completion_log`], and the final datasets are
//! written by [`tables`]. Plain sequence collections are loaded by [`fasta`].

pub mod completion_log;
pub mod discovery;
pub mod fasta;
pub mod records;
pub mod tables;
