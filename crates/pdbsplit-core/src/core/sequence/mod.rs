//! Sequence extraction from structure files.
//!
//! The rest of the library depends only on the [`traits::SequenceSource`] contract. Two
//! implementations are provided: [`native::AtomRecordSource`] reads ATOM records directly, and
//! [`pdb_tools::PdbToolsSource`] drives the `pdb_tofasta`/`pdb_selres` command-line tools.

pub mod native;
pub mod pdb_tools;
pub(crate) mod residues;
pub mod traits;
