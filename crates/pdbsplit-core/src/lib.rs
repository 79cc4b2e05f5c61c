//! # pdbsplit Core Library
//!
//! Splits annotated protein structure files into the sequences of their secondary-structure
//! regions (HELIX and SHEET records) and the unstructured stretches between them, over large
//! batches of files that can be resumed across runs.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models, annotation parsing, sequence
//!   extraction, the segmentation algorithm, and file I/O for logs and tables.
//!
//! - **[`engine`]: Per-file processing.** Batch configuration, the worker boundary that turns
//!   every per-file error into a tagged failure, error types and progress events.
//!
//! - **[`workflows`]: The Public API.** The batch driver: discovers pending files, runs them on
//!   a bounded worker pool, aggregates results and maintains the completion log.

pub mod core;
pub mod engine;
pub mod workflows;
