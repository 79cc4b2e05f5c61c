//! # Core Module
//!
//! Stateless building blocks of the pipeline.
//!
//! - **Data models** ([`models`]) - residue ranges, full sequences, per-file outputs
//! - **File I/O** ([`io`]) - annotation records, input discovery, completion log, output tables
//! - **Sequence extraction** ([`sequence`]) - the `SequenceSource` contract and its implementations
//! - **Segmentation** ([`segmentation`]) - structured regions and the unstructured complement

pub mod io;
pub mod models;
pub mod segmentation;
pub mod sequence;
