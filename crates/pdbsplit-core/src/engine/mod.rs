//! # Engine Module
//!
//! Per-file processing and the settings that govern a batch run.
//!
//! - **Configuration** ([`config`]) - worker-pool size, input extension, checkpointing
//! - **Error Handling** ([`error`]) - per-file failure causes and run-level errors
//! - **Progress Monitoring** ([`progress`]) - events emitted while a batch runs
//! - **Workers** ([`worker`]) - one file end to end, with failures contained at the boundary

pub mod config;
pub mod error;
pub mod progress;
pub mod worker;
