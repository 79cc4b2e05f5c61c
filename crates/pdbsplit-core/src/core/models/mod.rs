//! Data models shared by every stage of the pipeline.
//!
//! - [`structure`] - secondary-structure kinds and validated residue ranges
//! - [`sequence`] - the full residue sequence of one input file
//! - [`region`] - per-file outputs: structured regions and unstructured gap segments

pub mod region;
pub mod sequence;
pub mod structure;
