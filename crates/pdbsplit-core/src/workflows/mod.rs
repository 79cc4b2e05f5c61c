//! # Workflows Module
//!
//! High-level entry points that tie the `core` and `engine` layers together.
//!
//! - **Batch Workflow** ([`batch`]) - resumable, concurrent segmentation of a directory of
//!   structure files, with completion tracking and aggregated output tables.
//! - **FASTA Workflow** ([`fasta`]) - loads every FASTA file of a directory into one record
//!   table.

pub mod batch;
pub mod fasta;
